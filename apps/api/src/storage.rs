//! Archive of uploaded resume files in S3-compatible object storage.

use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{DocumentFormat, UploadedDocument};

/// Object key for an archived resume: `resumes/{user_id}/{scan_id}/{file_name}`.
pub fn resume_key(user_id: Uuid, scan_id: Uuid, file_name: &str) -> String {
    format!("resumes/{user_id}/{scan_id}/{}", sanitize_file_name(file_name))
}

/// Uploads the original resume bytes and returns the object key.
pub async fn archive_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    user_id: Uuid,
    scan_id: Uuid,
    format: DocumentFormat,
    document: &UploadedDocument,
) -> Result<String, AppError> {
    let key = resume_key(user_id, scan_id, &document.file_name);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(document.bytes.clone()))
        .content_type(archive_content_type(format, document))
        .send()
        .await
        .map_err(|e| AppError::S3(format!("resume upload failed: {e}")))?;

    info!("Archived resume for scan {scan_id} at s3://{bucket}/{key}");
    Ok(key)
}

/// The upload's own content type, or the detected format's when the client
/// sent none.
fn archive_content_type(format: DocumentFormat, document: &UploadedDocument) -> &str {
    document
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| format.mime_type())
}

/// Keeps ASCII letters, digits, dots, dashes and underscores; everything else
/// becomes `_`. Path separators never survive.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned.to_string()
    }
}
