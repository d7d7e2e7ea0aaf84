pub mod canonical_config;
pub mod clustering_config;
pub mod defaults;
pub mod embedding_config;
pub mod matching_config;
pub mod naming_config;
pub mod observability_config;
pub mod output_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use canonical_config::CanonicalConfig;
pub use clustering_config::ClusteringConfig;
pub use embedding_config::EmbeddingConfig;
pub use matching_config::MatchingConfig;
pub use naming_config::NamingConfig;
pub use observability_config::ObservabilityConfig;
pub use output_config::OutputConfig;

use crate::errors::{ConfigError, TechcatResult};

/// Top-level resolver configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechcatConfig {
    pub matching: MatchingConfig,
    pub clustering: ClusteringConfig,
    pub canonical: CanonicalConfig,
    pub embedding: EmbeddingConfig,
    pub naming: NamingConfig,
    pub output: OutputConfig,
    pub observability: ObservabilityConfig,
}

impl TechcatConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> TechcatResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and provider credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_values = [
            ("matching.fuzzy_weight", self.matching.fuzzy_weight),
            ("matching.semantic_weight", self.matching.semantic_weight),
            ("matching.acceptance_threshold", self.matching.acceptance_threshold),
            ("clustering.fuzzy_weight", self.clustering.fuzzy_weight),
            ("clustering.semantic_weight", self.clustering.semantic_weight),
            ("clustering.edge_threshold", self.clustering.edge_threshold),
            ("canonical.fuzzy_weight", self.canonical.fuzzy_weight),
            ("canonical.semantic_weight", self.canonical.semantic_weight),
            ("canonical.edge_threshold", self.canonical.edge_threshold),
            ("canonical.high_tier", self.canonical.high_tier),
            ("canonical.medium_tier", self.canonical.medium_tier),
            ("canonical.min_variant_overlap", self.canonical.min_variant_overlap),
            ("output.min_coverage", self.output.min_coverage),
        ];
        for (key, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }

        if self.canonical.medium_tier > self.canonical.high_tier {
            return Err(ConfigError::InvalidValue {
                key: "canonical.medium_tier".to_string(),
                reason: format!(
                    "medium tier {} exceeds high tier {}",
                    self.canonical.medium_tier, self.canonical.high_tier
                ),
            });
        }

        let positive_counts = [
            ("clustering.top_k", self.clustering.top_k),
            ("canonical.top_k", self.canonical.top_k),
            ("embedding.dimensions", self.embedding.dimensions),
            ("embedding.batch_size", self.embedding.batch_size),
            ("embedding.max_concurrent", self.embedding.max_concurrent),
            ("naming.max_concurrent", self.naming.max_concurrent),
        ];
        for (key, value) in positive_counts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        let timeouts = [
            ("embedding.timeout_secs", self.embedding.timeout_secs),
            ("naming.timeout_secs", self.naming.timeout_secs),
        ];
        for (key, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "a zero timeout fails every call".to_string(),
                });
            }
        }

        if !["louvain", "components"].contains(&self.clustering.community_algorithm.as_str()) {
            return Err(ConfigError::UnknownProvider {
                component: "clustering.community_algorithm".to_string(),
                provider: self.clustering.community_algorithm.clone(),
            });
        }

        check_provider("embedding", &self.embedding.provider, &["api", "hashed"], &self.embedding.api_key_env)?;
        check_provider("naming", &self.naming.provider, &["api", "heuristic"], &self.naming.api_key_env)?;

        Ok(())
    }
}

fn check_provider(
    component: &str,
    provider: &str,
    known: &[&str],
    api_key_env: &str,
) -> Result<(), ConfigError> {
    if !known.contains(&provider) {
        return Err(ConfigError::UnknownProvider {
            component: component.to_string(),
            provider: provider.to_string(),
        });
    }
    if provider == "api" && std::env::var(api_key_env).map(|v| v.is_empty()).unwrap_or(true) {
        return Err(ConfigError::MissingCredential {
            provider: format!("{component} api"),
            env_var: api_key_env.to_string(),
        });
    }
    Ok(())
}
