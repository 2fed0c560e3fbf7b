use thiserror::Error;

use crate::service::ServiceError;
use intake_pdf::IntakeError;

/// Pipeline failure taxonomy.
///
/// Every stage fails closed: no stage substitutes a default or guessed value
/// to continue past an error, and no error is silently recovered into a
/// different state.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The PDF could not be opened/parsed, or layout analysis could not
    /// determine a verdict for any page.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// The service output did not yield a parseable JSON span, or yielded a
    /// `class` outside the six known ids. No default category is ever
    /// assumed.
    #[error("classification error: {0}")]
    Classification(String),

    /// Contract violation: a class that was valid at classification time has
    /// no dispatch entry. Enum-keyed routing makes this unreachable in
    /// practice; the variant exists so the contract stays explicit.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// The analysis-stage response did not yield a parseable JSON object.
    #[error("analysis response parse error: {0}")]
    AnalysisParse(String),

    /// Network/timeout/authentication failure at the Text Analysis Service
    /// boundary, surfaced distinctly from parse errors so callers can decide
    /// to retry.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<IntakeError> for PipelineError {
    fn from(err: IntakeError) -> Self {
        PipelineError::Extraction(err.to_string())
    }
}
