use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding capability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" or "hashed".
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub dimensions: usize,
    /// Texts per embedding request.
    pub batch_size: usize,
    /// Concurrent embedding requests in flight.
    pub max_concurrent: usize,
    pub timeout_secs: u64,
    /// Expected number of distinct texts per run. Preallocates the
    /// exact-text cache; entries are never evicted.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            max_concurrent: defaults::DEFAULT_MAX_CONCURRENT_CALLS,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
