use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::ats::scorer::ResumeScorer;
use crate::config::Config;
use crate::extract::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Pluggable scorer. Default: KeywordResumeScorer.
    pub scorer: Arc<dyn ResumeScorer>,
    /// Pluggable document reader. Default: DocumentTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
