//! Error types for the docintake server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use analysis_engine::{PipelineError, ServiceError};

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Scanned documents are not supported")]
    UnsupportedDocument,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::DocumentNotFound(reference) => (
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                format!("Document '{}' not found", reference),
            ),
            ServerError::UnsupportedDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_DOCUMENT",
                "Scanned documents are not supported; a machine-readable text layer is required"
                    .to_string(),
            ),
            ServerError::Pipeline(err) => pipeline_status(err),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Map a pipeline failure to an HTTP status and error code. Service-boundary
/// failures are kept distinguishable from parse failures so clients can
/// decide to retry.
fn pipeline_status(err: &PipelineError) -> (StatusCode, &'static str, String) {
    match err {
        PipelineError::Extraction(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "EXTRACTION_ERROR",
            msg.clone(),
        ),
        PipelineError::Classification(msg) => (
            StatusCode::BAD_GATEWAY,
            "CLASSIFICATION_ERROR",
            msg.clone(),
        ),
        PipelineError::Dispatch(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "DISPATCH_ERROR",
            msg.clone(),
        ),
        PipelineError::AnalysisParse(msg) => (
            StatusCode::BAD_GATEWAY,
            "ANALYSIS_PARSE_ERROR",
            msg.clone(),
        ),
        PipelineError::Service(ServiceError::Timeout(ms)) => (
            StatusCode::GATEWAY_TIMEOUT,
            "SERVICE_TIMEOUT",
            format!("Text analysis service timed out after {}ms", ms),
        ),
        PipelineError::Service(service_err) => (
            StatusCode::BAD_GATEWAY,
            "SERVICE_ERROR",
            service_err.to_string(),
        ),
    }
}
