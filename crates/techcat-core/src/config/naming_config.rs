use serde::{Deserialize, Serialize};

use super::defaults;

/// Naming capability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Naming provider: "api" or "heuristic".
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub api_key_env: String,
    pub max_concurrent: usize,
    pub timeout_secs: u64,
    /// Industry context passed with every naming request.
    pub industry: String,
    /// Closed set of domains a canonical technology may carry.
    pub domain_taxonomy: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_NAMING_PROVIDER.to_string(),
            model: defaults::DEFAULT_NAMING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_NAMING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_NAMING_API_KEY_ENV.to_string(),
            max_concurrent: defaults::DEFAULT_MAX_CONCURRENT_CALLS,
            timeout_secs: defaults::DEFAULT_NAMING_TIMEOUT_SECS,
            industry: defaults::DEFAULT_INDUSTRY.to_string(),
            domain_taxonomy: defaults::default_domain_taxonomy(),
        }
    }
}
