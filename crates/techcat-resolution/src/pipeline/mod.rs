//! Sequential stage runner.
//!
//! Each stage consumes the complete output of the previous one, writes its
//! checkpoint artifacts, and reports a `StageSummary`. Resuming loads the
//! artifacts of every upstream stage into a `RunState` and runs the rest.

pub mod artifacts;
pub mod stage;
pub mod summary;

use std::time::Instant;

use techcat_core::errors::{ArtifactError, TechcatResult};
use techcat_core::models::{
    Catalog, Cluster, DedupOutcome, MatchOutcome, MergeDecision, NamingOutcome, RawMention,
    ReviewRecord, StageSummary,
};
use tracing::info;

pub use artifacts::ArtifactStore;
pub use stage::{files, Stage};
pub use summary::{RunReport, RunSummary};

use crate::stages::NormalizationOutcome;

/// Outputs accumulated so far in one run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub normalized: Option<NormalizationOutcome>,
    pub matches: Option<MatchOutcome>,
    pub clusters: Option<Vec<Cluster>>,
    pub naming: Option<NamingOutcome>,
    pub merged: Option<DedupOutcome>,
    pub deduplicated: Option<DedupOutcome>,
    pub summaries: Vec<StageSummary>,
}

fn no_upstream(stage: Stage) -> ArtifactError {
    ArtifactError::NoUpstream {
        stage: stage.to_string(),
    }
}

impl RunState {
    /// Load the artifacts of every stage before `from`.
    pub fn hydrate(store: &ArtifactStore, from: Stage) -> TechcatResult<Self> {
        if from == Stage::Normalize {
            return Err(no_upstream(from).into());
        }
        let mut state = Self::default();
        for stage in from.upstream() {
            match stage {
                Stage::Normalize => state.normalized = Some(store.read(files::NORMALIZED_MENTIONS)?),
                Stage::Match => state.matches = Some(store.read(files::CATALOG_MATCHES)?),
                Stage::Cluster => state.clusters = Some(store.read(files::CLUSTERS)?),
                Stage::Canonicalize => state.naming = Some(store.read(files::CANONICAL_RESULTS)?),
                Stage::Deduplicate => state.merged = Some(read_dedup(store, files::MERGED_CATALOG, files::FIRST_PASS_AUDIT, None)?),
                Stage::CanonicalDedup => {
                    state.deduplicated = Some(read_dedup(
                        store,
                        files::DEDUPLICATED_CATALOG,
                        files::SECOND_PASS_AUDIT,
                        Some(files::REVIEW_QUEUE),
                    )?)
                }
                Stage::Build => {}
            }
        }
        info!(from = %from, dir = %store.dir().display(), "run state restored from artifacts");
        Ok(state)
    }

    pub fn require_normalized(&self) -> TechcatResult<&NormalizationOutcome> {
        self.normalized.as_ref().ok_or_else(|| no_upstream(Stage::Match).into())
    }

    pub fn require_matches(&self) -> TechcatResult<&MatchOutcome> {
        self.matches.as_ref().ok_or_else(|| no_upstream(Stage::Cluster).into())
    }

    pub fn require_clusters(&self) -> TechcatResult<&[Cluster]> {
        self.clusters
            .as_deref()
            .ok_or_else(|| no_upstream(Stage::Canonicalize).into())
    }

    pub fn require_naming(&self) -> TechcatResult<&NamingOutcome> {
        self.naming.as_ref().ok_or_else(|| no_upstream(Stage::Deduplicate).into())
    }

    pub fn require_merged(&self) -> TechcatResult<&DedupOutcome> {
        self.merged.as_ref().ok_or_else(|| no_upstream(Stage::CanonicalDedup).into())
    }

    pub fn require_deduplicated(&self) -> TechcatResult<&DedupOutcome> {
        self.deduplicated.as_ref().ok_or_else(|| no_upstream(Stage::Build).into())
    }
}

fn read_dedup(
    store: &ArtifactStore,
    catalog_file: &str,
    audit_file: &str,
    review_file: Option<&str>,
) -> TechcatResult<DedupOutcome> {
    let catalog: Catalog = store.read(catalog_file)?;
    let decisions: Vec<MergeDecision> = store.read(audit_file)?;
    let review_queue: Vec<ReviewRecord> = match review_file {
        Some(file) => store.read(file)?,
        None => Vec::new(),
    };
    Ok(DedupOutcome {
        catalog,
        decisions,
        review_queue,
    })
}

/// Persist a dedup outcome across its catalog, audit and optional review files.
pub(crate) fn write_dedup(
    store: &ArtifactStore,
    outcome: &DedupOutcome,
    catalog_file: &str,
    audit_file: &str,
    review_file: Option<&str>,
) -> TechcatResult<()> {
    store.write(catalog_file, &outcome.catalog)?;
    store.write(audit_file, &outcome.decisions)?;
    if let Some(file) = review_file {
        store.write(file, &outcome.review_queue)?;
    }
    Ok(())
}

/// Times one stage and seeds its summary.
pub(crate) struct StageTimer {
    stage: Stage,
    started: Instant,
}

impl StageTimer {
    pub(crate) fn start(stage: Stage) -> Self {
        info!(stage = %stage, "stage started");
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self, processed: usize, skipped: usize, produced: usize) -> StageSummary {
        let mut summary = StageSummary::new(self.stage.as_str());
        summary.processed = processed;
        summary.skipped = skipped;
        summary.produced = produced;
        summary.elapsed_ms = self.started.elapsed().as_millis() as u64;
        info!(
            stage = %self.stage,
            processed,
            skipped,
            produced,
            elapsed_ms = summary.elapsed_ms,
            "stage complete"
        );
        summary
    }
}

/// Raw input is needed only when a run starts at normalization.
pub(crate) fn require_raw(raw: Option<&[RawMention]>) -> TechcatResult<&[RawMention]> {
    raw.ok_or_else(|| no_upstream(Stage::Normalize).into())
}
