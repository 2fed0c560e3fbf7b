//! Text Analysis Service boundary.

use async_trait::async_trait;
use thiserror::Error;

/// External collaborator that turns a prompt pair into a raw text response.
///
/// The response is expected, but not guaranteed, to contain exactly one JSON
/// object; callers defensively extract the object span before parsing.
#[async_trait]
pub trait TextAnalysisService: Send + Sync {
    /// Send one (system instruction, user instruction) pair and return the
    /// raw response text.
    async fn analyze(&self, system: &str, user: &str) -> Result<String, ServiceError>;
}

/// Failures at the service boundary. Kept separate from parse errors so a
/// timeout is never mistaken for malformed output.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("text analysis service timed out after {0} ms")]
    Timeout(u64),

    #[error("text analysis service unreachable: {0}")]
    Network(String),

    #[error("text analysis service authentication failed: {0}")]
    Auth(String),

    /// The transport succeeded but the service envelope itself was malformed
    /// (e.g. no content block in the response body).
    #[error("text analysis service returned a malformed envelope: {0}")]
    Envelope(String),
}
