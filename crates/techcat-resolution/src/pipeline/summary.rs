use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use techcat_core::models::{FinalCatalog, StageSummary, ValidationReport};

use super::stage::Stage;

/// Written to `run_summary.json` at the end of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub resolver_version: String,
    /// Layout version of the checkpoint artifacts this run read and wrote.
    pub artifact_schema_version: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when the run resumed from a checkpoint.
    pub resumed_from: Option<Stage>,
    pub stages: Vec<StageSummary>,
    pub embedding_provider: String,
    pub naming_provider: String,
    pub embedding_cache_hits: usize,
    pub embedding_cache_misses: usize,
    pub validation_passed: bool,
}

/// Everything a caller gets back from one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub catalog: FinalCatalog,
    pub validation: ValidationReport,
    pub summary: RunSummary,
}
