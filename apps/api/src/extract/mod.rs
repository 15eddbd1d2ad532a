//! Document text extraction — turns an uploaded resume into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default backend reads
//! PDFs with `pdf-extract` and accepts UTF-8 plain text as-is.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}. Upload a PDF or plain text file.")]
    UnsupportedFormat(String),

    #[error("Text file is not valid UTF-8")]
    Encoding,

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("No text could be extracted from the document")]
    NoText,

    #[error("Extraction task failed: {0}")]
    Join(String),
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Detects the format from the file extension, falling back to the
    /// declared content type.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, ExtractError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentFormat::Pdf),
            Some("txt") | Some("md") | Some("text") => return Ok(DocumentFormat::PlainText),
            _ => {}
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/pdf") => Ok(DocumentFormat::Pdf),
            Some(m) if m.starts_with("text/") => Ok(DocumentFormat::PlainText),
            other => Err(ExtractError::UnsupportedFormat(
                extension
                    .map(|ext| format!(".{ext}"))
                    .or_else(|| other.map(String::from))
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::PlainText => "text/plain",
        }
    }
}

/// Converts a document into plain text. Implementations must be cheap to
/// share across request tasks.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractError>;
}

/// PDF + plain text extractor.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractError> {
        let format = DocumentFormat::detect(&document.file_name, document.content_type.as_deref())?;
        debug!(
            "Extracting {:?} text from '{}' ({} bytes)",
            format,
            document.file_name,
            document.bytes.len()
        );

        let text = match format {
            DocumentFormat::PlainText => plain_text(&document.bytes)?,
            DocumentFormat::Pdf => {
                // pdf-extract is CPU-bound and synchronous
                let bytes = document.bytes.clone();
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                    .await
                    .map_err(|e| ExtractError::Join(e.to_string()))?
                    .map_err(|e| ExtractError::Pdf(e.to_string()))?
            }
        };

        if text.trim().is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(text)
    }
}

fn plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ExtractError::Encoding)?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, content_type: Option<&str>, body: &'static [u8]) -> UploadedDocument {
        UploadedDocument {
            file_name: name.to_string(),
            content_type: content_type.map(String::from),
            bytes: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(DocumentFormat::detect("cv.PDF", None).unwrap(), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::detect("cv.txt", Some("application/octet-stream")).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            DocumentFormat::detect("resume", Some("application/pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect("resume", Some("text/plain; charset=utf-8")).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_docx_is_unsupported() {
        let err = DocumentFormat::detect(
            "cv.docx",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref f) if f == ".docx"));
    }

    #[test]
    fn test_unknown_without_hints() {
        let err = DocumentFormat::detect("resume", None).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref f) if f == "unknown"));
    }

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let text = DocumentTextExtractor
            .extract(&doc("cv.txt", None, b"\xEF\xBB\xBFJane Doe\nEducation"))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nEducation");
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let err = DocumentTextExtractor
            .extract(&doc("cv.txt", None, &[0xff, 0xfe, 0x00]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Encoding));
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let err = DocumentTextExtractor
            .extract(&doc("cv.txt", None, b"   \n  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NoText));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error_not_a_crash() {
        let err = DocumentTextExtractor
            .extract(&doc("cv.pdf", Some("application/pdf"), b"not really a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_) | ExtractError::Join(_)));
    }
}
