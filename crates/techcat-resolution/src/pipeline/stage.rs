use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Normalize,
    Match,
    Cluster,
    Canonicalize,
    Deduplicate,
    CanonicalDedup,
    Build,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Normalize,
        Stage::Match,
        Stage::Cluster,
        Stage::Canonicalize,
        Stage::Deduplicate,
        Stage::CanonicalDedup,
        Stage::Build,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Match => "match",
            Stage::Cluster => "cluster",
            Stage::Canonicalize => "canonicalize",
            Stage::Deduplicate => "deduplicate",
            Stage::CanonicalDedup => "canonical_dedup",
            Stage::Build => "build",
        }
    }

    /// Checkpoint files this stage writes.
    pub fn artifacts(self) -> &'static [&'static str] {
        match self {
            Stage::Normalize => &[files::NORMALIZED_MENTIONS],
            Stage::Match => &[files::CATALOG_MATCHES],
            Stage::Cluster => &[files::CLUSTERS],
            Stage::Canonicalize => &[files::CANONICAL_RESULTS],
            Stage::Deduplicate => &[files::MERGED_CATALOG, files::FIRST_PASS_AUDIT],
            Stage::CanonicalDedup => &[
                files::DEDUPLICATED_CATALOG,
                files::SECOND_PASS_AUDIT,
                files::REVIEW_QUEUE,
            ],
            Stage::Build => &[files::FINAL_CATALOG, files::VALIDATION_REPORT],
        }
    }

    /// Stages strictly before this one.
    pub fn upstream(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().take_while(move |s| *s < self)
    }

    /// This stage and every later one.
    pub fn downstream(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().skip_while(move |s| *s < self)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Stage::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown stage '{s}', expected one of: {}", known.join(", "))
            })
    }
}

pub mod files {
    pub const NORMALIZED_MENTIONS: &str = "01_normalized_mentions.json";
    pub const CATALOG_MATCHES: &str = "02_catalog_matches.json";
    pub const CLUSTERS: &str = "03_clusters.json";
    pub const CANONICAL_RESULTS: &str = "04_canonical_results.json";
    pub const MERGED_CATALOG: &str = "05_merged_catalog.json";
    pub const FIRST_PASS_AUDIT: &str = "05_merge_audit.json";
    pub const DEDUPLICATED_CATALOG: &str = "06_deduplicated_catalog.json";
    pub const SECOND_PASS_AUDIT: &str = "06_merge_audit.json";
    pub const REVIEW_QUEUE: &str = "06_review_queue.json";
    pub const FINAL_CATALOG: &str = "final_catalog.json";
    pub const VALIDATION_REPORT: &str = "validation_report.json";
    pub const RUN_SUMMARY: &str = "run_summary.json";
}
