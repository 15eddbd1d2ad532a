//! Scan history — append-only storage of scan results per user.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::ats::scorer::ScanResult;
use crate::models::scan::{ScanRow, ScanSummary};

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Parameters for recording a finished scan.
pub struct NewScan<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: Option<&'a str>,
    pub job_description: &'a str,
    pub resume_file_name: Option<&'a str>,
    pub resume_s3_key: Option<&'a str>,
    pub result: &'a ScanResult,
}

/// Inserts a scan. Existing rows are never updated.
pub async fn insert_scan(pool: &PgPool, scan: NewScan<'_>) -> sqlx::Result<ScanRow> {
    let NewScan {
        id,
        user_id,
        job_title,
        job_description,
        resume_file_name,
        resume_s3_key,
        result,
    } = scan;

    let row = sqlx::query_as::<_, ScanRow>(
        r#"
        INSERT INTO ats_scans
            (id, user_id, job_title, job_description, resume_file_name,
             resume_s3_key, score, result)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(job_title)
    .bind(job_description)
    .bind(resume_file_name)
    .bind(resume_s3_key)
    .bind(result.score as i32)
    .bind(Json(result))
    .fetch_one(pool)
    .await?;

    info!("Stored scan {id} for user {user_id} (score {})", result.score);
    Ok(row)
}

/// Newest-first history for a user. `limit` is clamped to 1..=MAX_HISTORY_LIMIT.
pub async fn list_scans(
    pool: &PgPool,
    user_id: Uuid,
    limit: Option<i64>,
) -> sqlx::Result<Vec<ScanSummary>> {
    sqlx::query_as::<_, ScanSummary>(
        r#"
        SELECT id, job_title, score, created_at
        FROM ats_scans
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await
}

/// Fetches a scan only if it belongs to `user_id`.
pub async fn get_scan(
    pool: &PgPool,
    user_id: Uuid,
    scan_id: Uuid,
) -> sqlx::Result<Option<ScanRow>> {
    sqlx::query_as::<_, ScanRow>("SELECT * FROM ats_scans WHERE id = $1 AND user_id = $2")
        .bind(scan_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Deletes a scan owned by `user_id`. Returns whether a row was removed.
pub async fn delete_scan(pool: &PgPool, user_id: Uuid, scan_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM ats_scans WHERE id = $1 AND user_id = $2")
        .bind(scan_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted scan {scan_id} for user {user_id}");
    }
    Ok(result.rows_affected() > 0)
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}
