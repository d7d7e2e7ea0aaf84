use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Which deduplication pass produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStage {
    /// Cluster proposals folded against the working catalog.
    FirstPass,
    /// Canonical-name re-clustering.
    SecondPass,
}

/// Similarity tier of a second-pass candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// Why the domain gate passed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainGate {
    Identical,
    Unknown,
    Related,
    Incompatible,
}

impl DomainGate {
    pub fn passed(self) -> bool {
        !matches!(self, Self::Incompatible)
    }
}

/// Full gate breakdown for one second-pass pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResults {
    pub domain: DomainGate,
    pub domain_passed: bool,
    pub variant_overlap: f64,
    pub variant_overlap_passed: bool,
    pub tier: ConfidenceTier,
}

/// Final verdict on a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    /// First-pass fold of a cluster proposal into an existing technology.
    Folded,
    AutoMerge,
    Review,
}

/// Append-only audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeDecision {
    pub stage: MergeStage,
    /// Retired side. `None` id for a first-pass proposal that was never minted.
    pub from_id: Option<String>,
    pub from_name: String,
    /// Surviving side.
    pub into_id: String,
    pub into_name: String,
    pub similarity: f64,
    #[serde(default)]
    pub gates: Option<GateResults>,
    pub decision: MergeOutcome,
    pub decided_at: DateTime<Utc>,
}

/// A pair deferred to manual or batch resolution. Both entries stay separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub community_id: usize,
    pub primary_id: String,
    pub primary_name: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub similarity: f64,
    pub gates: GateResults,
    pub reason: String,
    pub queued_at: DateTime<Utc>,
}

/// Output of a deduplication stage: the new catalog plus its audit trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedupOutcome {
    pub catalog: Catalog,
    pub decisions: Vec<MergeDecision>,
    pub review_queue: Vec<ReviewRecord>,
}
