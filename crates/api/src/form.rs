//! Request body parsing for content create and update requests.
//!
//! Parsing runs to completion before any store or database call, so a
//! malformed body never leaves partial state behind.

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use herald_core::content::{ContentInput, Upload};
use herald_shared::AppError;

/// Fallback MIME type for file parts sent without one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A parsed content form.
#[derive(Debug, Default)]
pub struct ContentForm {
    /// Textual fields.
    pub input: ContentInput,
    /// The image, if one was sent.
    pub image: Option<Upload>,
}

/// Body encodings accepted for content forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Multipart,
    Json,
    UrlEncoded,
    Other,
}

impl Encoding {
    fn of(request: &Request) -> Self {
        let essence = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match essence.as_str() {
            "multipart/form-data" => Self::Multipart,
            "application/x-www-form-urlencoded" => Self::UrlEncoded,
            json if json == "application/json" || json.ends_with("+json") => Self::Json,
            _ => Self::Other,
        }
    }
}

impl ContentForm {
    /// Parse a create or update body.
    ///
    /// Multipart bodies may carry an image in `file_field`. JSON and
    /// urlencoded bodies carry text fields only. Any other body is ignored
    /// and yields an empty form.
    ///
    /// # Errors
    ///
    /// Returns `PayloadTooLarge` when the body exceeds the configured limit
    /// and `Validation` when it cannot be decoded.
    pub async fn from_request(request: Request, file_field: &str) -> Result<Self, AppError> {
        match Encoding::of(&request) {
            Encoding::Multipart => {
                let multipart = Multipart::from_request(request, &())
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                Self::from_multipart(multipart, file_field).await
            }
            Encoding::Json => {
                let Json(input) = Json::<ContentInput>::from_request(request, &())
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                Ok(Self { input, image: None })
            }
            Encoding::UrlEncoded => {
                let Form(input) = Form::<ContentInput>::from_request(request, &())
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                Ok(Self { input, image: None })
            }
            Encoding::Other => Ok(Self::default()),
        }
    }

    /// Read every part of `multipart`.
    ///
    /// `title`, `content` and `author` are read as text. The part named
    /// `file_field` becomes the upload; an empty file part counts as no
    /// file. Unknown parts are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PayloadTooLarge` if the body limit is hit while reading, or
    /// `Validation` if the body is not valid multipart or a second file
    /// part is sent.
    pub async fn from_multipart(
        mut multipart: Multipart,
        file_field: &str,
    ) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, "Failed to read multipart"))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == file_field {
                if form.image.is_some() {
                    return Err(AppError::Validation(format!(
                        "Only one file may be sent in '{file_field}'"
                    )));
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&e, "Failed to read file data"))?;

                if !(bytes.is_empty() && filename.is_empty()) {
                    form.image = Some(Upload::new(filename, content_type, bytes));
                }
                continue;
            }

            let slot = match name.as_str() {
                "title" => &mut form.input.title,
                "content" => &mut form.input.content,
                "author" => &mut form.input.author,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|e| multipart_error(&e, &format!("Failed to read field '{name}'")))?;
            *slot = Some(text);
        }

        Ok(form)
    }
}

fn rejected(status: StatusCode, msg: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(msg)
    } else {
        AppError::Validation(msg)
    }
}

fn multipart_error(e: &MultipartError, context: &str) -> AppError {
    rejected(e.status(), format!("{context}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use rstest::rstest;

    fn request(content_type: Option<&str>) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case(Some("multipart/form-data; boundary=x"), Encoding::Multipart)]
    #[case(Some("application/json"), Encoding::Json)]
    #[case(Some("application/json; charset=utf-8"), Encoding::Json)]
    #[case(Some("application/merge-patch+json"), Encoding::Json)]
    #[case(Some("Application/X-WWW-Form-Urlencoded"), Encoding::UrlEncoded)]
    #[case(Some("text/plain"), Encoding::Other)]
    #[case(None, Encoding::Other)]
    fn test_encoding_of(#[case] content_type: Option<&str>, #[case] expected: Encoding) {
        assert_eq!(Encoding::of(&request(content_type)), expected);
    }

    #[test]
    fn test_rejection_status_mapping() {
        let err = rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string());
        assert_eq!(err.status_code(), 413);

        let err = rejected(StatusCode::UNPROCESSABLE_ENTITY, "bad".to_string());
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_json_body_has_no_image() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"T","content":"C"}"#))
            .unwrap();

        let form = ContentForm::from_request(request, "blog_image")
            .await
            .unwrap();

        assert_eq!(form.input.title.as_deref(), Some("T"));
        assert_eq!(form.input.content.as_deref(), Some("C"));
        assert_eq!(form.input.author, None);
        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=Hello&author=Ada"))
            .unwrap();

        let form = ContentForm::from_request(request, "news_image")
            .await
            .unwrap();

        assert_eq!(form.input.title.as_deref(), Some("Hello"));
        assert_eq!(form.input.author.as_deref(), Some("Ada"));
        assert_eq!(form.input.content, None);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = ContentForm::from_request(request, "blog_image")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
