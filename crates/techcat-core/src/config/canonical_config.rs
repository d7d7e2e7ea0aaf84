use serde::{Deserialize, Serialize};

use super::defaults;

/// Second-pass canonical-name re-clustering and merge gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalConfig {
    pub fuzzy_weight: f64,
    pub semantic_weight: f64,
    pub edge_threshold: f64,
    pub top_k: usize,
    /// Similarity at or above which a pair is always auto-merge eligible.
    pub high_tier: f64,
    /// Similarity at or above which a pair may auto-merge if both gates pass.
    pub medium_tier: f64,
    /// Minimum variant vocabulary overlap ratio for the overlap gate.
    pub min_variant_overlap: f64,
    /// Characters of the description included in the embedded representation.
    pub description_prefix_chars: usize,
    /// Domain pairs treated as compatible by the domain gate (order-insensitive).
    pub related_domains: Vec<(String, String)>,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            fuzzy_weight: defaults::DEFAULT_CANONICAL_FUZZY_WEIGHT,
            semantic_weight: defaults::DEFAULT_CANONICAL_SEMANTIC_WEIGHT,
            edge_threshold: defaults::DEFAULT_CANONICAL_EDGE_THRESHOLD,
            top_k: defaults::DEFAULT_TOP_K,
            high_tier: defaults::DEFAULT_HIGH_TIER,
            medium_tier: defaults::DEFAULT_MEDIUM_TIER,
            min_variant_overlap: defaults::DEFAULT_MIN_VARIANT_OVERLAP,
            description_prefix_chars: defaults::DEFAULT_DESCRIPTION_PREFIX_CHARS,
            related_domains: defaults::default_related_domains(),
        }
    }
}
