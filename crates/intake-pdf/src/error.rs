use thiserror::Error;

/// Intake-stage errors.
///
/// Any failure to open or read the document is fatal for the run; there is
/// no fallback beyond the single secondary-parser check in the classifier.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),
}
