//! API handlers for the docintake server
//!
//! Provides REST endpoints for:
//! - Document analysis (fetch from store, classify, analyze)
//! - Document class listing
//! - Health checks

use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use analysis_engine::{analyze_document, rules::validation_checks, PipelineOutcome};
use shared_types::{DocumentClass, FinalResponse};

use crate::aws::StoreError;
use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "docintake-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Document class list response
#[derive(Serialize)]
pub struct DocumentClassesResponse {
    pub success: bool,
    pub classes: Vec<DocumentClassInfo>,
    pub count: usize,
}

/// Document class metadata
#[derive(Serialize)]
pub struct DocumentClassInfo {
    pub id: u8,
    pub category: &'static str,
    pub validation_checks: Vec<&'static str>,
}

/// Handler: GET /api/document-classes
pub async fn handle_list_document_classes() -> Json<DocumentClassesResponse> {
    let classes: Vec<DocumentClassInfo> = DocumentClass::ALL
        .iter()
        .map(|class| DocumentClassInfo {
            id: class.id(),
            category: class.label(),
            validation_checks: validation_checks(*class).to_vec(),
        })
        .collect();

    let count = classes.len();

    Json(DocumentClassesResponse {
        success: true,
        classes,
        count,
    })
}

/// Analyze request body
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    /// Bucket holding the PDF
    pub bucket: String,

    /// Object key of the PDF
    pub key: String,

    /// Reference date for date-relative validation rules. Defaults to the
    /// current date.
    pub as_of: Option<NaiveDate>,
}

/// Analyze response
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: FinalResponse,
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    if req.bucket.is_empty() || req.key.is_empty() {
        return Err(ServerError::InvalidRequest(
            "bucket and key must be non-empty".to_string(),
        ));
    }

    info!(bucket = %req.bucket, key = %req.key, "analyze request");

    let bytes = state
        .documents
        .fetch(&req.bucket, &req.key)
        .await
        .map_err(|err| match err {
            StoreError::NotFound { bucket, key } => {
                ServerError::DocumentNotFound(format!("{bucket}/{key}"))
            }
            StoreError::Backend(msg) => ServerError::Internal(msg),
        })?;

    let as_of = req.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let outcome = analyze_document(&bytes, as_of, state.service.as_ref()).await?;
    let analysis = match outcome {
        PipelineOutcome::Complete(analysis) => analysis,
        PipelineOutcome::UnsupportedScanned => return Err(ServerError::UnsupportedDocument),
    };

    let mut result = FinalResponse {
        category: analysis.classification.category,
        class_id: analysis.classification.class.id(),
        confidence: analysis.classification.confidence,
        analysis: analysis.analysis,
        record_id: None,
    };

    // Persistence is best-effort: a store failure never fails a completed
    // analysis.
    if let Some(results) = &state.results {
        match results.persist(&result).await {
            Ok(record_id) => result.record_id = Some(record_id),
            Err(err) => warn!(error = %err, "failed to persist analysis result"),
        }
    }

    Ok(Json(AnalyzeResponse {
        success: true,
        result,
    }))
}
