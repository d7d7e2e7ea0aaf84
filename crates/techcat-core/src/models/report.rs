use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CanonicalTechnology;

/// A variant that resolves to more than one canonical id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanedVariant {
    pub name: String,
    pub canonical_ids: Vec<String>,
}

/// Result of final catalog validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_technologies: usize,
    pub total_variants: usize,
    pub unique_input_mentions: usize,
    /// Percentage in [0, 100].
    pub coverage_pct: f64,
    pub duplicate_names: Vec<String>,
    pub orphaned_variants: Vec<OrphanedVariant>,
    pub warnings: Vec<String>,
    /// Gates promotion to production use. The catalog is written either way.
    pub passed: bool,
    pub validated_at: DateTime<Utc>,
}

/// Per-stage counts, so absorbed failures are always visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: String,
    pub processed: usize,
    pub skipped: usize,
    pub produced: usize,
    /// Stage-specific counters (matched, unmatched, merges, ...).
    #[serde(default)]
    pub counters: BTreeMap<String, usize>,
    pub elapsed_ms: u64,
}

impl StageSummary {
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            ..Default::default()
        }
    }

    pub fn with_counter(mut self, key: &str, value: usize) -> Self {
        self.counters.insert(key.to_string(), value);
        self
    }
}

/// The versioned catalog handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalCatalog {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub industry: String,
    pub total_technologies: usize,
    pub total_variants: usize,
    pub total_occurrences: u64,
    /// Sorted by canonical name.
    pub technologies: Vec<CanonicalTechnology>,
}
