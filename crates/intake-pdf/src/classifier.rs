//! Document-level scanned-vs-text classification.
//!
//! Aggregates per-page layout signals into a single verdict via majority
//! vote. Ambiguous pages are reconciled through the secondary parser, which
//! is consulted for the first page only; that one reference result is reused
//! for every ambiguous occurrence.

use lopdf::Document;
use tracing::debug;

use crate::error::IntakeError;
use crate::layout::{analyze_page, PageSignal};
use crate::secondary;

/// Document-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannedVerdict {
    /// Majority of pages are image-dominant; the document has no reliable
    /// text layer.
    Scanned,
    /// Majority of pages carry extractable text.
    Text,
    /// No page could be evaluated at all.
    Undetermined,
}

/// Result of classifying one document.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Raw per-page layout signals, in page order.
    pub page_signals: Vec<PageSignal>,
    /// Post-reconciliation per-page verdicts (`true` = scanned), in page
    /// order. Empty iff the verdict is `Undetermined`.
    pub page_scanned: Vec<bool>,
    pub verdict: ScannedVerdict,
}

/// Classify a whole document from raw bytes.
///
/// A parser-level failure to open the document aborts classification with
/// [`IntakeError::Parse`]; it is never folded into `Undetermined`.
pub fn classify_document(bytes: &[u8]) -> Result<ScanReport, IntakeError> {
    let doc = Document::load_mem(bytes).map_err(|e| IntakeError::Parse(e.to_string()))?;

    let page_signals: Vec<PageSignal> = doc
        .get_pages()
        .iter()
        .map(|(number, id)| analyze_page(&doc, *number, *id))
        .collect();

    let report = reconcile(page_signals, || secondary::first_page_text(bytes).is_some());
    debug!(
        pages = report.page_signals.len(),
        verdict = ?report.verdict,
        "scanned/text classification"
    );
    Ok(report)
}

/// Reconcile raw signals into per-page verdicts and aggregate them.
///
/// `fallback_has_text` is invoked at most once, and only when at least one
/// page is ambiguous: it answers whether the secondary parser finds text on
/// the document's first page.
pub fn reconcile(
    page_signals: Vec<PageSignal>,
    fallback_has_text: impl FnOnce() -> bool,
) -> ScanReport {
    let fallback = if page_signals.contains(&PageSignal::Ambiguous) {
        Some(fallback_has_text())
    } else {
        None
    };

    let page_scanned: Vec<bool> = page_signals
        .iter()
        .map(|signal| match signal {
            PageSignal::TextDominant => false,
            PageSignal::ImageDominant => true,
            // Text on the reference page clears the ambiguity; otherwise the
            // page counts as scanned.
            PageSignal::Ambiguous => !fallback.unwrap_or(false),
        })
        .collect();

    let verdict = aggregate(&page_scanned);
    ScanReport {
        page_signals,
        page_scanned,
        verdict,
    }
}

/// Majority rule over per-page verdicts. Ties round toward scanned; an empty
/// sequence is `Undetermined`.
pub fn aggregate(page_scanned: &[bool]) -> ScannedVerdict {
    if page_scanned.is_empty() {
        return ScannedVerdict::Undetermined;
    }
    let scanned = page_scanned.iter().filter(|s| **s).count();
    // scanned/total >= 0.5, without floating point
    if scanned * 2 >= page_scanned.len() {
        ScannedVerdict::Scanned
    } else {
        ScannedVerdict::Text
    }
}
