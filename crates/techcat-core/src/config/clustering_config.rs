use serde::{Deserialize, Serialize};

use super::defaults;

/// First-pass hybrid clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub fuzzy_weight: f64,
    pub semantic_weight: f64,
    /// Minimum fused score for a graph edge (inclusive).
    pub edge_threshold: f64,
    /// Candidates retrieved per mention by each of keyword and embedding search.
    pub top_k: usize,
    /// Seed for the community detector's node visiting order.
    pub seed: u64,
    /// Upper bound on local-moving passes per community detection level.
    pub max_passes: usize,
    /// Community detector: "louvain" or "components".
    pub community_algorithm: String,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            fuzzy_weight: defaults::DEFAULT_CLUSTER_FUZZY_WEIGHT,
            semantic_weight: defaults::DEFAULT_CLUSTER_SEMANTIC_WEIGHT,
            edge_threshold: defaults::DEFAULT_CLUSTER_EDGE_THRESHOLD,
            top_k: defaults::DEFAULT_TOP_K,
            seed: defaults::DEFAULT_COMMUNITY_SEED,
            max_passes: defaults::DEFAULT_COMMUNITY_MAX_PASSES,
            community_algorithm: defaults::DEFAULT_COMMUNITY_ALGORITHM.to_string(),
        }
    }
}
