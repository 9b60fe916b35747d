//! Cloud API embedding provider.
//!
//! HTTP client for OpenAI-compatible `/embeddings` endpoints (DashScope
//! compatible mode by default). Transport errors and 5xx responses are
//! retried with exponential backoff; everything else fails immediately.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serif_core::config::EmbeddingConfig;
use serif_core::errors::{EmbeddingError, SerifError, SerifResult};
use serif_core::traits::EmbeddingProvider;
use tracing::{debug, warn};

const INITIAL_BACKOFF: Duration = Duration::from_millis(200);

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Outcome of one HTTP attempt that did not produce a response body.
enum AttemptError {
    Retryable(EmbeddingError),
    Fatal(EmbeddingError),
}

/// Embedding provider backed by a remote HTTP service.
pub struct ApiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
}

impl ApiProvider {
    /// Build a provider from config. Fails only if the HTTP client cannot be constructed.
    pub fn new(config: &EmbeddingConfig) -> SerifResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| SerifError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_embeddings(&self, texts: &[String]) -> SerifResult<Vec<Vec<f32>>> {
        let body = EmbedRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };

        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(response) => return self.decode(response, texts.len()),
                Err(AttemptError::Retryable(e)) if attempt < self.max_retries => {
                    warn!(attempt, error = %e, "embedding request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(AttemptError::Retryable(e)) | Err(AttemptError::Fatal(e)) => {
                    return Err(e.into());
                }
            }
        }
    }

    async fn send_once(&self, body: &EmbedRequest<'_>) -> Result<EmbedResponse, AttemptError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AttemptError::Retryable(EmbeddingError::RequestFailed {
                    reason: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = EmbeddingError::BadStatus {
                status: status.as_u16(),
                body,
            };
            return Err(if status.is_server_error() {
                AttemptError::Retryable(err)
            } else {
                AttemptError::Fatal(err)
            });
        }

        response.json::<EmbedResponse>().await.map_err(|e| {
            AttemptError::Fatal(EmbeddingError::MalformedResponse {
                reason: e.to_string(),
            })
        })
    }

    /// Restore input order, then check count and dimensions.
    fn decode(&self, response: EmbedResponse, expected: usize) -> SerifResult<Vec<Vec<f32>>> {
        let mut data = response.data;
        if data.iter().all(|d| d.index.is_some()) {
            data.sort_by_key(|d| d.index);
        }

        if data.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }

        let vectors: Vec<Vec<f32>> = data.into_iter().map(|d| d.embedding).collect();
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimensions) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: bad.len(),
            }
            .into());
        }

        debug!(count = vectors.len(), model = %self.model, "embedding batch decoded");
        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for ApiProvider {
    async fn embed_batch(&self, texts: &[String]) -> SerifResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
