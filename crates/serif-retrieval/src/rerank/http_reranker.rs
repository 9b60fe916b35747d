//! DashScope text-rerank client.
//!
//! Every failure (transport, status, body, timeout) is reported as
//! [`RerankOutcome::Unavailable`]; this type never returns an error after
//! construction.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serif_core::config::RerankConfig;
use serif_core::errors::{SerifError, SerifResult};
use serif_core::models::{RerankHit, RerankOutcome};
use serif_core::traits::RerankProvider;
use tracing::debug;

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    input: RerankInput<'a>,
    parameters: RerankParameters,
}

#[derive(Serialize)]
struct RerankInput<'a> {
    query: &'a str,
    documents: &'a [String],
}

#[derive(Serialize)]
struct RerankParameters {
    return_documents: bool,
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    output: RerankOutput,
}

#[derive(Deserialize)]
struct RerankOutput {
    #[serde(default)]
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f32,
}

/// Reranker backed by the DashScope text-rerank HTTP API.
pub struct HttpReranker {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpReranker {
    /// Build a reranker. `api_key` is passed separately because it may be
    /// inherited from the embedding config.
    pub fn new(config: &RerankConfig, api_key: &str) -> SerifResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SerifError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankHit>, String> {
        let body = RerankRequest {
            model: &self.model,
            input: RerankInput { query, documents },
            parameters: RerankParameters {
                return_documents: false,
                top_n,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    format!("timed out: {e}")
                } else {
                    format!("request failed: {e}")
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("status {}: {text}", status.as_u16()));
        }

        let parsed: RerankResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed response: {e}"))?;

        Ok(order_hits(parsed.output.results, top_n))
    }
}

/// Most relevant first, at most `top_n`. Equal relevance keeps service order.
fn order_hits(results: Vec<RerankResult>, top_n: usize) -> Vec<RerankHit> {
    let mut hits: Vec<RerankHit> = results
        .into_iter()
        .map(|r| RerankHit {
            index: r.index,
            relevance: r.relevance_score,
        })
        .collect();
    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    hits.truncate(top_n);
    hits
}

#[async_trait]
impl RerankProvider for HttpReranker {
    async fn rerank(&self, query: &str, documents: &[String], top_n: usize) -> RerankOutcome {
        if documents.is_empty() {
            return RerankOutcome::Ranked(Vec::new());
        }
        match self.request(query, documents, top_n).await {
            Ok(hits) => {
                debug!(documents = documents.len(), hits = hits.len(), "rerank completed");
                RerankOutcome::Ranked(hits)
            }
            Err(reason) => RerankOutcome::unavailable(reason),
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_service_schema() {
        let docs = vec!["a".to_string(), "b".to_string()];
        let body = RerankRequest {
            model: "qwen3-rerank",
            input: RerankInput {
                query: "q",
                documents: &docs,
            },
            parameters: RerankParameters {
                return_documents: false,
                top_n: 2,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "qwen3-rerank",
                "input": {"query": "q", "documents": ["a", "b"]},
                "parameters": {"return_documents": false, "top_n": 2}
            })
        );
    }

    #[test]
    fn hits_are_sorted_and_truncated() {
        let results = [(0, 0.2), (1, 0.9), (2, 0.5)]
            .into_iter()
            .map(|(index, relevance_score)| RerankResult {
                index,
                relevance_score,
            })
            .collect();
        let hits = order_hits(results, 2);
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(hits[0].relevance, 0.9);
    }

    #[test]
    fn missing_results_array_is_empty_ranking() {
        let parsed: RerankResponse = serde_json::from_str(r#"{"output":{}}"#).unwrap();
        assert!(parsed.output.results.is_empty());
    }
}
