use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored scan. Rows are inserted once and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub job_description: String,
    pub resume_file_name: Option<String>,
    pub resume_s3_key: Option<String>,
    pub score: i32,
    /// Serialized `ScanResult`.
    pub result: Value,
    pub created_at: DateTime<Utc>,
}

/// History listing entry, without the job description and full result.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanSummary {
    pub id: Uuid,
    pub job_title: Option<String>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
