use serde::{Deserialize, Serialize};

use super::defaults;

/// Catalog matching configuration (exact → fused cascade).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Weight of the edit-distance ratio in the fused score.
    pub fuzzy_weight: f64,
    /// Weight of the embedding cosine in the fused score.
    pub semantic_weight: f64,
    /// Minimum fused score for a catalog match (inclusive).
    pub acceptance_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_weight: defaults::DEFAULT_MATCH_FUZZY_WEIGHT,
            semantic_weight: defaults::DEFAULT_MATCH_SEMANTIC_WEIGHT,
            acceptance_threshold: defaults::DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}
