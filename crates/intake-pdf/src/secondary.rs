//! Secondary-parser fallback.
//!
//! `pdf-extract` does not expose page boundaries directly; extracted text is
//! split on form feed characters, matching how the primary document text is
//! paginated.

/// Extract the first page's text via the secondary parser.
///
/// Returns `None` when the parser fails or the first page holds no
/// non-whitespace text. Only page 1 is ever consulted: ambiguous pages
/// elsewhere in the document are reconciled against this one reference page.
pub(crate) fn first_page_text(bytes: &[u8]) -> Option<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).ok()?;
    let first = text.split('\x0C').next().unwrap_or("").trim().to_string();
    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}
