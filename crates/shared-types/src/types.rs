use serde::{Deserialize, Serialize};

/// The six fixed document categories the pipeline can analyze.
///
/// Class ids are part of the wire contract with the Text Analysis Service:
/// the classification prompt enumerates them and the service answers with a
/// numeric `class`. Ids outside 0..=5 are rejected, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentClass {
    Identity,
    AddressProof,
    Registration,
    Ownership,
    TaxReturn,
    Financial,
}

impl DocumentClass {
    /// All classes in class-id order.
    pub const ALL: [DocumentClass; 6] = [
        DocumentClass::Identity,
        DocumentClass::AddressProof,
        DocumentClass::Registration,
        DocumentClass::Ownership,
        DocumentClass::TaxReturn,
        DocumentClass::Financial,
    ];

    /// Numeric class id used by the classification contract.
    pub fn id(&self) -> u8 {
        match self {
            DocumentClass::Identity => 0,
            DocumentClass::AddressProof => 1,
            DocumentClass::Registration => 2,
            DocumentClass::Ownership => 3,
            DocumentClass::TaxReturn => 4,
            DocumentClass::Financial => 5,
        }
    }

    /// Look up a class by numeric id. Returns `None` for ids outside 0..=5.
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(DocumentClass::Identity),
            1 => Some(DocumentClass::AddressProof),
            2 => Some(DocumentClass::Registration),
            3 => Some(DocumentClass::Ownership),
            4 => Some(DocumentClass::TaxReturn),
            5 => Some(DocumentClass::Financial),
            _ => None,
        }
    }

    /// Human-readable category label used in prompts and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentClass::Identity => "Proof of Identity Document",
            DocumentClass::AddressProof => "Proof of Address Document",
            DocumentClass::Registration => "Business Registration Document",
            DocumentClass::Ownership => "Ownership Document",
            DocumentClass::TaxReturn => "Tax Return Document",
            DocumentClass::Financial => "Financial Document",
        }
    }
}

/// Outcome of the document-type classification stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub class: DocumentClass,
    /// Category label as reported by the service (canonical label when the
    /// service omits it).
    pub category: String,
    /// Service-reported confidence in [0,1]. Never locally computed; absent
    /// when the service omits it.
    pub confidence: Option<f64>,
}

/// Final response envelope: classification joined with the structured
/// analysis, optionally annotated with a persisted-record id.
///
/// Immutable after assembly; built exactly once per pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResponse {
    pub category: String,
    pub class_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// The parsed analysis mapping, returned unchanged from the service.
    pub analysis: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}
