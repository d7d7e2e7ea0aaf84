use serde::{Deserialize, Serialize};

use super::mention::DocType;

/// Summary of one cluster member sent to the naming capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub name: String,
    pub occurrence_count: u64,
    pub roles: Vec<String>,
    pub doc_types: Vec<DocType>,
}

/// Input to the naming capability for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingRequest {
    pub cluster_id: String,
    pub variants: Vec<VariantSummary>,
    pub avg_similarity: f64,
    pub domain_taxonomy: Vec<String>,
    pub industry: String,
}

/// Raw, unvalidated answer of the naming capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamingResponse {
    #[serde(alias = "name")]
    pub canonical_name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub rationale: String,
}

/// Validated canonical proposal for a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    pub cluster_id: String,
    pub input_variants: Vec<String>,
    pub canonical_name: String,
    pub domain: String,
    pub description: String,
    pub confidence: f64,
    pub rationale: String,
}

/// A cluster whose naming call failed. Its members stay tracked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingFailure {
    pub cluster_id: String,
    pub variants: Vec<String>,
    pub reason: String,
}

/// Buffered result of canonicalizing every cluster, in cluster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamingOutcome {
    pub results: Vec<CanonicalResult>,
    pub failures: Vec<NamingFailure>,
}
