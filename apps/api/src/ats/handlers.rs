//! Axum route handlers for the ATS scan API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ats::history::{delete_scan, get_scan, insert_scan, list_scans, NewScan};
use crate::ats::scorer::ScanResult;
use crate::errors::AppError;
use crate::extract::{DocumentFormat, UploadedDocument};
use crate::models::scan::{ScanRow, ScanSummary};
use crate::state::AppState;
use crate::storage::archive_resume;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub scan_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub result: ScanResult,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// Fields collected from the multipart scan form.
#[derive(Debug, Default)]
struct ScanForm {
    user_id: Option<String>,
    job_title: Option<String>,
    job_description: Option<String>,
    resume: Option<UploadedDocument>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/analyze
///
/// Scores resume text against a job description. Nothing is stored.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ScanResult>, AppError> {
    let Json(request) = payload?;
    let result = state
        .scorer
        .analyze(&request.resume_text, &request.job_description)?;
    Ok(Json(result))
}

/// POST /api/v1/ats/scan
///
/// Multipart upload: `user_id`, `job_description`, optional `job_title` and
/// the `resume` file. Extracts the text, scores it, archives the file and
/// records the scan in the user's history.
pub async fn handle_scan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanResponse>, AppError> {
    let form = read_scan_form(multipart?).await?;

    let user_id = parse_user_id(form.user_id.as_deref())?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;
    let job_title = form
        .job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let document = form
        .resume
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    if document.bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "resume exceeds the {} byte limit",
            state.config.max_upload_bytes
        )));
    }

    let format = DocumentFormat::detect(&document.file_name, document.content_type.as_deref())?;
    let resume_text = state.extractor.extract(&document).await.map_err(|e| {
        warn!("Text extraction failed for '{}': {e}", document.file_name);
        AppError::from(e)
    })?;

    let result = state.scorer.analyze(&resume_text, &job_description)?;

    let scan_id = Uuid::new_v4();
    let s3_key = archive_resume(
        &state.s3,
        &state.config.s3_bucket,
        user_id,
        scan_id,
        format,
        &document,
    )
    .await?;

    let row = insert_scan(
        &state.db,
        NewScan {
            id: scan_id,
            user_id,
            job_title: job_title.as_deref(),
            job_description: &job_description,
            resume_file_name: Some(document.file_name.as_str()),
            resume_s3_key: Some(s3_key.as_str()),
            result: &result,
        },
    )
    .await?;

    info!(
        "Scan {scan_id} complete for user {user_id}: score {}, {} missing keywords",
        result.score,
        result.missing_keywords.len()
    );

    Ok(Json(ScanResponse {
        scan_id: row.id,
        created_at: row.created_at,
        result,
    }))
}

/// GET /api/v1/ats/history
pub async fn handle_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<ScanSummary>>, AppError> {
    let Query(params) = query?;
    let scans = list_scans(&state.db, params.user_id, params.limit).await?;
    Ok(Json(scans))
}

/// GET /api/v1/ats/scans/:id
pub async fn handle_get_scan(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<ScanRow>, AppError> {
    let Path(scan_id) = path?;
    let Query(params) = query?;
    let scan = get_scan(&state.db, params.user_id, scan_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Scan {scan_id} not found")))?;
    Ok(Json(scan))
}

/// DELETE /api/v1/ats/scans/:id
pub async fn handle_delete_scan(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Path(scan_id) = path?;
    let Query(params) = query?;
    if !delete_scan(&state.db, params.user_id, scan_id).await? {
        return Err(AppError::NotFound(format!("Scan {scan_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_scan_form(mut multipart: Multipart) -> Result<ScanForm, AppError> {
    let mut form = ScanForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => form.user_id = Some(field.text().await?),
            "job_title" => form.job_title = Some(field.text().await?),
            "job_description" => form.job_description = Some(field.text().await?),
            "resume" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| "resume".to_string());
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                form.resume = Some(UploadedDocument {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    Ok(form)
}

fn parse_user_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("user_id '{raw}' is not a valid UUID")))
}
