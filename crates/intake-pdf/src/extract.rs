//! Full-document text extraction.

use lopdf::Document;

use crate::error::IntakeError;

/// Extract the concatenated raw text of all pages, joined with newlines.
///
/// Only meaningful for documents already judged text-dominant; callers gate
/// this behind the scanned/text classifier. Any per-page extraction failure
/// is fatal for the run.
pub fn extract_document_text(bytes: &[u8]) -> Result<String, IntakeError> {
    let doc = Document::load_mem(bytes).map_err(|e| IntakeError::Parse(e.to_string()))?;

    let mut pages = Vec::new();
    for number in doc.get_pages().keys() {
        let text = doc
            .extract_text(&[*number])
            .map_err(|e| IntakeError::Extraction(format!("page {}: {}", number, e)))?;
        pages.push(text);
    }

    Ok(pages.join("\n"))
}
