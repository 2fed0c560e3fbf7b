//! Document analysis engine.
//!
//! Takes the extracted text of a machine-readable document through
//! classification, schema dispatch, and result validation:
//!
//! - [`classify`] — document-type classification prompt and tolerant parsing
//!   of the service's answer into one of six fixed classes.
//! - [`prompts`] — the six-entry dispatch table mapping a [`DocumentClass`]
//!   to its (system prompt, user-prompt builder) pair.
//! - [`rules`] — the shared numeric/date validation semantics and the
//!   per-class validation-check vocabulary embedded in the prompts.
//! - [`response`] — balanced JSON object extraction from prose-wrapped
//!   service output.
//! - [`pipeline`] — the document-level state machine tying intake,
//!   classification, dispatch, and validation together.
//!
//! The Text Analysis Service itself is an external collaborator behind the
//! [`TextAnalysisService`] trait; nothing in this crate talks to a network.
//!
//! [`DocumentClass`]: shared_types::DocumentClass

pub mod classify;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod response;
pub mod rules;
pub mod service;

pub use error::PipelineError;
pub use pipeline::{analyze_document, DocumentAnalysis, PipelineOutcome};
pub use prompts::AnalysisRequest;
pub use service::{ServiceError, TextAnalysisService};
