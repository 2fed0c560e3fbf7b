//! Document-type classification.
//!
//! Builds the classification prompt and parses the service's answer into
//! one of the six fixed [`DocumentClass`] values. An answer whose `class`
//! falls outside the known ids is a classification error; no default
//! category is ever assumed.

use shared_types::{Classification, DocumentClass};

use crate::error::PipelineError;
use crate::response::extract_json_object;

/// System instruction for the classification call.
pub const CLASSIFY_SYSTEM_PROMPT: &str =
    "You are a document classification assistant. You read the text of a business or identity \
     document and assign it to exactly one of a fixed set of categories. Respond with JSON only; \
     do not include any text before or after the JSON object.";

/// Build the user instruction enumerating the six categories with their
/// numeric ids, followed by the document text.
pub fn classification_prompt(text: &str) -> String {
    let mut categories = String::new();
    for class in DocumentClass::ALL {
        categories.push_str(&format!("{}. {}\n", class.id(), class.label()));
    }
    format!(
        "Classify the following document into exactly one of these categories:\n\
         {categories}\n\
         Respond in the following JSON format:\n\
         {{\n\
             \"class\": <category number>,\n\
             \"category\": \"<category name>\",\n\
             \"confidence_score\": <probability between 0 and 1>\n\
         }}\n\n\
         DOCUMENT TEXT:\n{text}"
    )
}

/// Parse the raw classification response.
///
/// The `class` field is authoritative; `category` defaults to the class
/// label when absent, and `confidence_score` is optional.
pub fn parse_classification(raw: &str) -> Result<Classification, PipelineError> {
    let value = extract_json_object(raw)
        .map_err(|e| PipelineError::Classification(format!("unparseable response: {e}")))?;

    let id = value
        .get("class")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| {
            PipelineError::Classification("response has no numeric `class` field".into())
        })?;

    let class = DocumentClass::from_id(id)
        .ok_or_else(|| PipelineError::Classification(format!("unknown class id {id}")))?;

    let category = value
        .get("category")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| class.label().to_owned());

    let confidence = value.get("confidence_score").and_then(|v| v.as_f64());

    Ok(Classification {
        class,
        category,
        confidence,
    })
}
