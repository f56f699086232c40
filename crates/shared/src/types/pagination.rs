//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
}

impl PageRequest {
    /// Default page number.
    pub const DEFAULT_PAGE: u64 = 1;
    /// Default page size.
    pub const DEFAULT_LIMIT: u64 = 10;
    /// Largest page size served.
    pub const MAX_LIMIT: u64 = 100;

    /// Builds a request, clamping the page size to `MAX_LIMIT` and
    /// replacing zero values by the defaults.
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { Self::DEFAULT_PAGE } else { page },
            limit: match limit {
                0 => Self::DEFAULT_LIMIT,
                l => l.min(Self::MAX_LIMIT),
            },
        }
    }

    /// Builds a request from raw query-string values.
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0);
        Self::new(parse(page), parse(limit))
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// Pagination metadata, serialized the way list endpoints report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages (approximate).
    pub nb_hits: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Current page number.
    pub current_page: u64,
}

impl PageMeta {
    /// Computes the metadata for `total` items split by `request`.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            nb_hits: total,
            total_pages: total.div_ceil(request.limit.max(1)),
            current_page: request.page,
        }
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total),
        }
    }

    /// Whether the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
