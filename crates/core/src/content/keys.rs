//! Object key generation for uploaded images.
//!
//! Keys have the form `{millis}-{sanitized_filename}`. The millisecond
//! component comes from the wall clock but is forced to increase strictly
//! within one generator, so two uploads of the same filename through the
//! same process never share a key. Separate processes can still collide
//! when they upload an identically named file in the same millisecond.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Longest sanitized filename kept in a key.
const MAX_FILENAME_LEN: usize = 200;

/// Longest extension preserved when a filename is shortened.
const MAX_EXTENSION_LEN: usize = 16;

/// Generates object keys for uploads.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    last_millis: AtomicI64,
}

impl KeyGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next key for a file named `filename`.
    pub fn next_key(&self, filename: &str) -> String {
        format!("{}-{}", self.next_millis(), sanitize_filename(filename))
    }

    /// Current time in milliseconds, bumped past the last value handed out.
    fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_millis.load(Ordering::Acquire);
        loop {
            let candidate = now.max(last + 1);
            match self.last_millis.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
/// Names longer than [`MAX_FILENAME_LEN`] are cut from the stem so the
/// extension survives.
fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        truncate_filename(sanitized)
    }
}

/// Shorten an ASCII filename to `MAX_FILENAME_LEN` bytes.
fn truncate_filename(mut name: String) -> String {
    if name.len() <= MAX_FILENAME_LEN {
        return name;
    }

    let extension = name
        .rfind('.')
        .filter(|&dot| dot > 0 && name.len() - dot <= MAX_EXTENSION_LEN)
        .map(|dot| name[dot..].to_string())
        .unwrap_or_default();
    name.truncate(MAX_FILENAME_LEN - extension.len());
    name.push_str(&extension);
    name
}
