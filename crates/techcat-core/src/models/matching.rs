use serde::{Deserialize, Serialize};

use super::mention::Mention;

/// Which cascade step produced a catalog match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Fused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    High,
    Medium,
}

/// A mention matched onto an existing catalog technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMatch {
    pub mention: Mention,
    pub canonical_id: String,
    pub canonical_name: String,
    pub score: f64,
    pub fuzzy_score: f64,
    pub semantic_score: f64,
    pub method: MatchMethod,
    pub confidence: MatchConfidence,
}

/// The matcher's complete partition of its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: Vec<CatalogMatch>,
    pub unmatched: Vec<Mention>,
}
