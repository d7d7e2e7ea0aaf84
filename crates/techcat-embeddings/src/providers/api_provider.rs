//! Cloud API embedding provider.
//!
//! Blocking HTTP client for OpenAI-compatible `/v1/embeddings` endpoints,
//! with retry and exponential backoff. Call it from a blocking thread
//! (the engine dispatches through `spawn_blocking`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use techcat_core::config::EmbeddingConfig;
use techcat_core::errors::{ConfigError, EmbeddingError, TechcatResult};
use techcat_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

pub struct ApiEmbeddingProvider {
    model: String,
    api_key: String,
    endpoint: String,
    dimensions: usize,
    timeout: Duration,
    available: AtomicBool,
    max_retries: u32,
}

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
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl ApiEmbeddingProvider {
    pub fn new(model: String, api_key: String, endpoint: String, dimensions: usize, timeout: Duration) -> Self {
        Self {
            model,
            api_key,
            endpoint,
            dimensions,
            timeout,
            available: AtomicBool::new(true),
            max_retries: 3,
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                provider: "embedding api".to_string(),
                env_var: config.api_key_env.clone(),
            })?;
        Ok(Self::new(
            config.model.clone(),
            api_key,
            config.endpoint.clone(),
            config.dimensions,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn request_embeddings(&self, texts: &[String]) -> TechcatResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let body = serde_json::to_string(&EmbedRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        })?;

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(200 * 2u64.pow(attempt - 1));
                std::thread::sleep(delay);
                debug!(attempt, "retrying API embedding request");
            }

            match self.send_request(&body, texts.len()) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "API embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.available.store(false, Ordering::Relaxed);
        Err(last_err.unwrap_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            }
            .into()
        }))
    }

    fn send_request(&self, body: &str, expected: usize) -> TechcatResult<Vec<Vec<f32>>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("client error: {e}"),
            })?;

        let response = client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let mut resp: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        resp.data.sort_by_key(|d| d.index);

        if resp.data.len() != expected {
            return Err(EmbeddingError::BatchSizeMismatch {
                sent: expected,
                received: resp.data.len(),
            }
            .into());
        }

        resp.data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    }
                    .into());
                }
                Ok(d.embedding)
            })
            .collect()
    }

    /// Reset availability (e.g., after a config change or health check).
    pub fn reset_availability(&self) {
        self.available.store(true, Ordering::Relaxed);
    }
}

impl IEmbeddingProvider for ApiEmbeddingProvider {
    fn embed(&self, text: &str) -> TechcatResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> TechcatResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
