//! AWS collaborator implementations
//!
//! Bedrock backs the Text Analysis Service; S3 backs both the document
//! store (PDF fetch) and the result store (best-effort persistence of
//! completed analyses). All clients are constructed once in `main` and
//! injected through `AppState`; nothing here holds process-global state.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{primitives::Blob, Client as BedrockClient};
use aws_sdk_s3::Client as S3Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use analysis_engine::{ServiceError, TextAnalysisService};
use shared_types::FinalResponse;

/// Default Bedrock model id, overridable via `--model-id`.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

/// Fetches raw PDF bytes by bucket/key reference.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Persists a completed analysis and returns an opaque record id.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn persist(&self, response: &FinalResponse) -> Result<String, StoreError>;
}

/// Store failures. Not-found is distinguishable so the API can answer 404
/// instead of a generic backend error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Bedrock-backed Text Analysis Service.
pub struct BedrockAnalyzer {
    client: BedrockClient,
    model_id: String,
    timeout_ms: u64,
}

impl BedrockAnalyzer {
    pub fn new(config: &aws_config::SdkConfig, model_id: &str, timeout_ms: u64) -> Self {
        Self {
            client: BedrockClient::new(config),
            model_id: model_id.to_string(),
            timeout_ms,
        }
    }

    /// Create with custom client (for testing)
    #[allow(dead_code)]
    pub fn with_client(client: BedrockClient, model_id: &str, timeout_ms: u64) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            timeout_ms,
        }
    }
}

/// Anthropic messages payload for a Bedrock `invoke_model` call.
pub fn anthropic_payload(system: &str, user: &str) -> serde_json::Value {
    json!({
        "anthropic_version": "bedrock-2023-05-31",
        "max_tokens": 4000,
        "temperature": 0.3,
        "top_p": 0.9,
        "top_k": 250,
        "system": system,
        "messages": [
            {
                "role": "user",
                "content": [{"type": "text", "text": user}]
            }
        ]
    })
}

/// Pull the text of the first content block out of a Bedrock response body.
pub fn response_text(body: &[u8]) -> Result<String, ServiceError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ServiceError::Envelope(format!("response body is not JSON: {e}")))?;
    value
        .get("content")
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(|text| text.as_str())
        .map(str::to_owned)
        .ok_or_else(|| ServiceError::Envelope("no text content block in response".to_string()))
}

#[async_trait]
impl TextAnalysisService for BedrockAnalyzer {
    async fn analyze(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let payload = anthropic_payload(system, user);
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ServiceError::Envelope(format!("failed to encode payload: {e}")))?;

        debug!(model_id = %self.model_id, user_chars = user.len(), "invoking model");

        let request = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send();

        let result = tokio::time::timeout(Duration::from_millis(self.timeout_ms), request)
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout_ms))?;

        let response = result.map_err(|err| {
            let service_err = err.into_service_error();
            error!(error = %service_err, "Bedrock invoke failed");
            if service_err.is_access_denied_exception() {
                ServiceError::Auth(service_err.to_string())
            } else {
                ServiceError::Network(service_err.to_string())
            }
        })?;

        response_text(response.body().as_ref())
    }
}

/// S3-backed document store.
pub struct S3DocumentStore {
    client: S3Client,
}

impl S3DocumentStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: S3Client::new(config),
        }
    }

    /// Create with custom client (for testing)
    #[allow(dead_code)]
    pub fn with_client(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    StoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StoreError::Backend(service_err.to_string())
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(data.into_bytes().to_vec())
    }
}

/// S3-backed result store. One JSON object per completed analysis under
/// `analyses/<uuid>.json`; the key is the record id.
pub struct S3ResultStore {
    client: S3Client,
    bucket: String,
}

impl S3ResultStore {
    pub fn new(config: &aws_config::SdkConfig, bucket: &str) -> Self {
        Self {
            client: S3Client::new(config),
            bucket: bucket.to_string(),
        }
    }

    /// Create with custom client (for testing)
    #[allow(dead_code)]
    pub fn with_client(client: S3Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ResultStore for S3ResultStore {
    async fn persist(&self, response: &FinalResponse) -> Result<String, StoreError> {
        let key = format!("analyses/{}.json", uuid::Uuid::new_v4());
        let body = serde_json::to_vec(response).map_err(|e| StoreError::Backend(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.into_service_error().to_string()))?;

        info!(bucket = %self.bucket, key = %key, "analysis result persisted");
        Ok(key)
    }
}
