//! PDF intake: layout analysis, scanned-vs-text classification, and raw
//! text extraction.
//!
//! The primary parser is `lopdf` (page tree walk, per-page text runs, image
//! XObject counting). `pdf-extract` serves as the secondary parser, used only
//! to disambiguate pages the primary parser could not call either way — and
//! only via the first page of the document.

pub mod classifier;
pub mod error;
pub mod extract;
pub mod layout;

mod secondary;

pub use classifier::{classify_document, ScanReport, ScannedVerdict};
pub use error::IntakeError;
pub use extract::extract_document_text;
pub use layout::PageSignal;

#[cfg(test)]
pub(crate) mod test_pdfs;
