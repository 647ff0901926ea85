//! File-to-text extraction for uploaded resumes.
//!
//! `.pdf` goes through `pdf-extract` on the blocking pool. Everything else is
//! decoded as UTF-8, and content that is not valid text comes back empty.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::editor::export::normalize_line_breaks;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Pdf,
}

impl SourceKind {
    /// `.pdf` by extension or content type; anything else is tried as text.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Self {
        let is_pdf_name = filename.to_ascii_lowercase().ends_with(".pdf");
        let is_pdf_type = content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
        if is_pdf_name || is_pdf_type {
            SourceKind::Pdf
        } else {
            SourceKind::Text
        }
    }
}

/// Extracts plain text from uploaded files. Stateless; one shared instance per process.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub async fn extract(
        &self,
        filename: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<String, SourceError> {
        match SourceKind::detect(filename, content_type) {
            SourceKind::Text => Ok(decode_text(&bytes)),
            SourceKind::Pdf => {
                let size = bytes.len();
                // pdf-extract may panic on malformed input; the join error catches it.
                let text = tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                })
                .await
                .map_err(|e| SourceError::Pdf(format!("extraction task aborted: {e}")))?
                .map_err(|e| SourceError::Pdf(e.to_string()))?;
                debug!(size, chars = text.len(), "PDF extracted");
                Ok(normalize_line_breaks(text.trim()))
            }
        }
    }
}

/// UTF-8 text with a leading BOM removed. Binary content (invalid UTF-8 or
/// containing NUL) yields an empty string.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if !text.contains('\0') => text.trim_start_matches('\u{feff}').to_string(),
        _ => {
            warn!(size = bytes.len(), "upload is not UTF-8 text; treating as empty");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(SourceKind::detect("cv.PDF", None), SourceKind::Pdf);
        assert_eq!(SourceKind::detect("blob", Some("application/pdf")), SourceKind::Pdf);
        assert_eq!(SourceKind::detect("cv.md", Some("text/markdown")), SourceKind::Text);
        assert_eq!(SourceKind::detect("cv.docx", None), SourceKind::Text);
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("\u{feff}Jane Doe\n".as_bytes()), "Jane Doe\n");
        assert_eq!(decode_text(&[0xff, 0xfe, 0x00]), "");
        assert_eq!(decode_text(b"ab\0cd"), "");
        assert_eq!(decode_text(b""), "");
    }

    #[tokio::test]
    async fn test_extract_plain_text() {
        let text = TextExtractor::new()
            .extract("resume.txt", Some("text/plain"), Bytes::from_static(b"Led a team"))
            .await
            .unwrap();
        assert_eq!(text, "Led a team");
    }

    #[tokio::test]
    async fn test_extract_garbage_pdf_is_an_error() {
        let result = TextExtractor::new()
            .extract("resume.pdf", None, Bytes::from_static(b"not really a pdf"))
            .await;
        assert!(matches!(result, Err(SourceError::Pdf(_))));
    }
}
