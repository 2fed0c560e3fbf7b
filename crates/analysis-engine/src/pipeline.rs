//! Document-level orchestration.
//!
//! One pipeline run walks a fixed sequence of stages:
//! layout analysis, scanned/text verdict, text extraction, document-type
//! classification, prompt dispatch, analysis, and result parsing. A scanned
//! verdict short-circuits to a terminal unsupported outcome before any
//! service call; every other stage failure ends the run with a typed error.
//! There is no retry loop and no stage ever substitutes a default to keep
//! going.

use chrono::NaiveDate;
use shared_types::Classification;
use tracing::{debug, info, warn};

use crate::classify::{classification_prompt, parse_classification, CLASSIFY_SYSTEM_PROMPT};
use crate::error::PipelineError;
use crate::prompts::build_request;
use crate::response::extract_json_object;
use crate::service::TextAnalysisService;
use intake_pdf::{classify_document, extract_document_text, ScannedVerdict};

/// A completed analysis: the classification that routed the document plus
/// the parsed analysis mapping, returned unchanged from the service.
#[derive(Debug)]
pub struct DocumentAnalysis {
    pub classification: Classification,
    pub analysis: serde_json::Value,
}

/// Terminal result of one pipeline run that did not error.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The document was machine-readable and fully analyzed.
    Complete(DocumentAnalysis),
    /// The document is scanned (image-dominant by majority). Not a failure:
    /// the caller decides how to surface it.
    UnsupportedScanned,
}

/// Run one document through the full pipeline.
///
/// `as_of` anchors the date-relative validation instructions rendered into
/// the analysis prompt. The service handle is borrowed for the duration of
/// the call only; nothing is retained across invocations.
pub async fn analyze_document(
    bytes: &[u8],
    as_of: NaiveDate,
    service: &dyn TextAnalysisService,
) -> Result<PipelineOutcome, PipelineError> {
    let report = classify_document(bytes)?;
    debug!(
        pages = report.page_signals.len(),
        verdict = ?report.verdict,
        "layout analysis complete"
    );

    match report.verdict {
        ScannedVerdict::Scanned => {
            info!("document is scanned; skipping analysis");
            return Ok(PipelineOutcome::UnsupportedScanned);
        }
        ScannedVerdict::Undetermined => {
            return Err(PipelineError::Extraction(
                "no pages could be analyzed; scanned/text verdict is undetermined".into(),
            ));
        }
        ScannedVerdict::Text => {}
    }

    let text = extract_document_text(bytes)?;
    debug!(chars = text.len(), "text extraction complete");

    let raw = service
        .analyze(CLASSIFY_SYSTEM_PROMPT, &classification_prompt(&text))
        .await?;
    let classification = parse_classification(&raw)?;
    info!(
        class = ?classification.class,
        category = %classification.category,
        confidence = ?classification.confidence,
        "document classified"
    );

    let request = build_request(classification.class, &text, as_of);
    let raw = service.analyze(request.system, &request.user).await?;
    let analysis = extract_json_object(&raw).map_err(|e| {
        warn!(class = ?classification.class, error = %e, "analysis response unparseable");
        PipelineError::AnalysisParse(e.to_string())
    })?;

    Ok(PipelineOutcome::Complete(DocumentAnalysis {
        classification,
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::DocumentClass;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays a fixed script of responses, one per `analyze` call.
    struct ScriptedService {
        responses: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(responses: &[&str]) -> Self {
            let mut responses: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextAnalysisService for ScriptedService {
        async fn analyze(&self, _system: &str, _user: &str) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ServiceError::Network("script exhausted".into()))
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    mod pdfs {
        use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

        /// One text page containing `text`, followed by `image_pages` pages
        /// holding only a raster XObject.
        pub fn text_then_images(text: &str, image_pages: usize) -> Vec<u8> {
            let mut doc = Document::with_version("1.7");
            let pages_id = doc.new_object_id();

            let font_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"Type1".to_vec())),
                ("BaseFont", Object::Name(b"Helvetica".to_vec())),
            ]));

            let mut page_ids = Vec::new();

            let text_content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            text.as_bytes().to_vec(),
                            lopdf::StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let mut fonts = Dictionary::new();
            fonts.set("F1", Object::Reference(font_id));
            let mut text_resources = Dictionary::new();
            text_resources.set("Font", Object::Dictionary(fonts));
            page_ids.push(add_page(&mut doc, pages_id, text_content, text_resources));

            for _ in 0..image_pages {
                let mut image_dict = Dictionary::new();
                image_dict.set("Type", Object::Name(b"XObject".to_vec()));
                image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
                image_dict.set("Width", Object::Integer(8));
                image_dict.set("Height", Object::Integer(8));
                image_dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
                image_dict.set("BitsPerComponent", Object::Integer(8));
                let image_id = doc.add_object(Stream::new(image_dict, vec![0u8; 64]));

                let content = Content {
                    operations: vec![
                        Operation::new("q", vec![]),
                        Operation::new(
                            "cm",
                            vec![
                                Object::Integer(612),
                                Object::Integer(0),
                                Object::Integer(0),
                                Object::Integer(792),
                                Object::Integer(0),
                                Object::Integer(0),
                            ],
                        ),
                        Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                        Operation::new("Q", vec![]),
                    ],
                };
                let mut xobjects = Dictionary::new();
                xobjects.set("Im0", Object::Reference(image_id));
                let mut resources = Dictionary::new();
                resources.set("XObject", Object::Dictionary(xobjects));
                page_ids.push(add_page(&mut doc, pages_id, content, resources));
            }

            let pages_dict = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Count", Object::Integer(page_ids.len() as i64)),
                (
                    "Kids",
                    Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
                ),
            ]);
            doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

            let catalog_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Catalog".to_vec())),
                ("Pages", Object::Reference(pages_id)),
            ]));
            doc.trailer.set("Root", Object::Reference(catalog_id));

            let mut buffer = Vec::new();
            doc.save_to(&mut buffer).unwrap();
            buffer
        }

        fn add_page(
            doc: &mut Document,
            pages_id: lopdf::ObjectId,
            content: Content,
            resources: Dictionary,
        ) -> lopdf::ObjectId {
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
            doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Dictionary(resources)),
            ]))
        }
    }

    #[tokio::test]
    async fn test_text_document_flows_through_to_complete() {
        let bytes = pdfs::text_then_images("Annual revenue statement for Acme Ltd", 0);
        let service = ScriptedService::new(&[
            r#"{"class": 5, "category": "Financial Document", "confidence_score": 0.88}"#,
            r#"Here is the analysis: {"summary": {"value": "ok"}, "validation": {"language": true}}"#,
        ]);

        let outcome = analyze_document(&bytes, as_of(), &service).await.unwrap();
        let analysis = match outcome {
            PipelineOutcome::Complete(analysis) => analysis,
            other => panic!("expected Complete, got {other:?}"),
        };

        assert_eq!(analysis.classification.class, DocumentClass::Financial);
        assert_eq!(analysis.classification.category, "Financial Document");
        assert_eq!(
            analysis.analysis,
            json!({"summary": {"value": "ok"}, "validation": {"language": true}})
        );
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_half_scanned_document_short_circuits_without_service_call() {
        // 1 text page + 1 image page: scanned fraction exactly 0.5, ties
        // round toward scanned.
        let bytes = pdfs::text_then_images("cover page", 1);
        let service = ScriptedService::new(&[]);

        let outcome = analyze_document(&bytes, as_of(), &service).await.unwrap();
        assert!(matches!(outcome, PipelineOutcome::UnsupportedScanned));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_majority_text_document_is_analyzed() {
        let bytes = pdfs::text_then_images("page one body text", 0);
        let service = ScriptedService::new(&[
            r#"{"class": 0}"#,
            r#"{"summary": {"value": "identity summary"}}"#,
        ]);

        let outcome = analyze_document(&bytes, as_of(), &service).await.unwrap();
        match outcome {
            PipelineOutcome::Complete(analysis) => {
                assert_eq!(analysis.classification.class, DocumentClass::Identity);
                // category defaults to the class label when the service
                // omits it
                assert_eq!(
                    analysis.classification.category,
                    "Proof of Identity Document"
                );
            }
            other => panic!("expected Complete, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_an_extraction_error() {
        let service = ScriptedService::new(&[]);
        let err = analyze_document(b"not a pdf at all", as_of(), &service)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_classification_stops_before_dispatch() {
        let bytes = pdfs::text_then_images("body", 0);
        let service = ScriptedService::new(&[r#"{"class": 42}"#]);

        let err = analyze_document(&bytes, as_of(), &service).await.unwrap_err();
        assert!(matches!(err, PipelineError::Classification(_)));
        // The analysis call never happens after a failed classification.
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_analysis_is_a_parse_error() {
        let bytes = pdfs::text_then_images("body", 0);
        let service = ScriptedService::new(&[
            r#"{"class": 2}"#,
            "I'm sorry, I cannot produce JSON for this document.",
        ]);

        let err = analyze_document(&bytes, as_of(), &service).await.unwrap_err();
        assert!(matches!(err, PipelineError::AnalysisParse(_)));
    }

    #[tokio::test]
    async fn test_service_failure_is_surfaced_as_service_error() {
        let bytes = pdfs::text_then_images("body", 0);
        // Empty script: the first analyze call fails at the boundary.
        let service = ScriptedService::new(&[]);

        let err = analyze_document(&bytes, as_of(), &service).await.unwrap_err();
        assert!(matches!(err, PipelineError::Service(_)));
    }
}
