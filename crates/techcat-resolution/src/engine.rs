//! ResolutionPipeline: single-run guard plus the six-stage pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use techcat_core::config::TechcatConfig;
use techcat_core::constants::{ARTIFACT_SCHEMA_VERSION, VERSION};
use techcat_core::errors::{ArtifactError, ResolutionError, TechcatResult};
use techcat_core::models::{Catalog, CatalogEntry, RawMention};
use techcat_core::traits::{ICanonicalNamer, IEmbeddingProvider};
use techcat_embeddings::{create_provider, EmbeddingEngine, PrefetchReport};
use techcat_naming::{create_namer, Canonicalizer};
use tracing::{info, warn};

use crate::algorithms::{detector_for, VectorLookup};
use crate::pipeline::{
    files, require_raw, write_dedup, ArtifactStore, RunReport, RunState, RunSummary, Stage,
    StageTimer,
};
use crate::stages::{
    CanonicalNameClusterer, CatalogBuilder, CatalogMatcher, Deduplicator, HybridClusterer,
    MentionNormalizer,
};

/// Releases the single-run flag when dropped.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ResolutionPipeline {
    /// Only one run at a time.
    is_running: Arc<AtomicBool>,
    config: TechcatConfig,
    embeddings: Arc<EmbeddingEngine>,
    canonicalizer: Canonicalizer,
    namer_name: String,
    store: ArtifactStore,
}

impl ResolutionPipeline {
    /// Build with explicit capabilities. Configuration errors are fatal.
    pub fn new(
        config: TechcatConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        namer: Arc<dyn ICanonicalNamer>,
    ) -> TechcatResult<Self> {
        config.validate()?;
        let embeddings = Arc::new(EmbeddingEngine::new(embedder, &config.embedding));
        let namer_name = namer.name().to_string();
        let canonicalizer = Canonicalizer::new(namer, config.naming.clone());
        let store = ArtifactStore::new(&config.output.artifact_dir);
        Ok(Self {
            is_running: Arc::new(AtomicBool::new(false)),
            config,
            embeddings,
            canonicalizer,
            namer_name,
            store,
        })
    }

    /// Build with the providers named in config.
    pub fn from_config(config: TechcatConfig) -> TechcatResult<Self> {
        config.validate()?;
        let embedder = create_provider(&config.embedding)?;
        let namer = create_namer(&config.naming)?;
        Self::new(config, embedder, namer)
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &TechcatConfig {
        &self.config
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Run every stage from raw mentions.
    pub async fn run(&self, raw: &[RawMention], existing: &[CatalogEntry]) -> TechcatResult<RunReport> {
        let _guard = self.acquire()?;
        let mut state = RunState::default();
        self.execute(Stage::Normalize, &mut state, Some(raw), existing, None)
            .await
    }

    /// Resume at `from`, loading upstream outputs from the artifact directory.
    pub async fn resume(&self, from: Stage, existing: &[CatalogEntry]) -> TechcatResult<RunReport> {
        let _guard = self.acquire()?;
        let mut state = RunState::hydrate(&self.store, from)?;
        self.execute(from, &mut state, None, existing, Some(from)).await
    }

    fn acquire(&self) -> TechcatResult<RunGuard<'_>> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ResolutionError::AlreadyRunning.into());
        }
        Ok(RunGuard(&self.is_running))
    }

    fn vectors(&self) -> &dyn VectorLookup {
        &*self.embeddings
    }

    async fn prefetch(&self, texts: &[String]) -> PrefetchReport {
        let report = self.embeddings.prefetch(texts).await;
        if report.failed > 0 {
            warn!(failed = report.failed, "some texts have no embedding and score 0 semantically");
        }
        report
    }

    async fn execute(
        &self,
        from: Stage,
        state: &mut RunState,
        raw: Option<&[RawMention]>,
        existing: &[CatalogEntry],
        resumed_from: Option<Stage>,
    ) -> TechcatResult<RunReport> {
        let started_at = Utc::now();
        let initial = Catalog::from_entries(existing);
        info!(
            from = %from,
            existing = initial.len(),
            artifact_dir = %self.store.dir().display(),
            "resolution run started"
        );

        let mut output = None;
        for stage in from.downstream() {
            let timer = StageTimer::start(stage);
            let summary = match stage {
                Stage::Normalize => {
                    let raw = require_raw(raw)?;
                    let out = MentionNormalizer::new().normalize(raw);
                    self.store.write(files::NORMALIZED_MENTIONS, &out)?;
                    let summary = timer
                        .finish(out.processed, out.skipped_missing_name, out.mentions.len())
                        .with_counter("skipped_missing_name", out.skipped_missing_name);
                    state.normalized = Some(out);
                    summary
                }
                Stage::Match => {
                    let mentions = &state.require_normalized()?.mentions;
                    let report = self.prefetch(&CatalogMatcher::embedding_texts(mentions, &initial)).await;
                    let matcher = CatalogMatcher::new(self.config.matching.clone());
                    let out = matcher.match_all(mentions, &initial, self.vectors());
                    self.store.write(files::CATALOG_MATCHES, &out)?;
                    let summary = timer
                        .finish(mentions.len(), 0, out.matched.len())
                        .with_counter("matched", out.matched.len())
                        .with_counter("unmatched", out.unmatched.len())
                        .with_counter("embedding_failures", report.failed);
                    state.matches = Some(out);
                    summary
                }
                Stage::Cluster => {
                    let unmatched = &state.require_matches()?.unmatched;
                    let report = self.prefetch(&HybridClusterer::embedding_texts(unmatched)).await;
                    let clusterer = HybridClusterer::new(
                        self.config.clustering.clone(),
                        detector_for(&self.config.clustering),
                    );
                    let clusters = clusterer.cluster(unmatched, self.vectors());
                    self.store.write(files::CLUSTERS, &clusters)?;
                    let singletons = clusters.iter().filter(|c| c.is_singleton()).count();
                    let summary = timer
                        .finish(unmatched.len(), 0, clusters.len())
                        .with_counter("singletons", singletons)
                        .with_counter("embedding_failures", report.failed);
                    state.clusters = Some(clusters);
                    summary
                }
                Stage::Canonicalize => {
                    let clusters = state.require_clusters()?;
                    let out = self.canonicalizer.canonicalize_all(clusters).await;
                    self.store.write(files::CANONICAL_RESULTS, &out)?;
                    let summary = timer
                        .finish(clusters.len(), out.failures.len(), out.results.len())
                        .with_counter("named", out.results.len())
                        .with_counter("failed", out.failures.len());
                    state.naming = Some(out);
                    summary
                }
                Stage::Deduplicate => {
                    let matches = &state.require_matches()?.matched;
                    let results = &state.require_naming()?.results;
                    let clusters = state.require_clusters()?;
                    let report = self.prefetch(&Deduplicator::embedding_texts(results, &initial)).await;
                    let dedup = Deduplicator::new(self.config.matching.clone());
                    let (out, counts) =
                        dedup.deduplicate(&initial, matches, results, clusters, self.vectors());
                    write_dedup(&self.store, &out, files::MERGED_CATALOG, files::FIRST_PASS_AUDIT, None)?;
                    let summary = timer
                        .finish(
                            matches.len() + results.len(),
                            counts.unknown_targets + counts.missing_clusters,
                            out.catalog.len(),
                        )
                        .with_counter("minted", counts.minted)
                        .with_counter("folded", counts.folded)
                        .with_counter("variants_added", counts.variants_added)
                        .with_counter("embedding_failures", report.failed);
                    state.merged = Some(out);
                    summary
                }
                Stage::CanonicalDedup => {
                    let merged = &state.require_merged()?.catalog;
                    let second = CanonicalNameClusterer::new(
                        self.config.canonical.clone(),
                        detector_for(&self.config.clustering),
                    );
                    let report = self.prefetch(&second.embedding_texts(merged)).await;
                    let (out, counts) = second.merge(merged, self.vectors());
                    write_dedup(
                        &self.store,
                        &out,
                        files::DEDUPLICATED_CATALOG,
                        files::SECOND_PASS_AUDIT,
                        Some(files::REVIEW_QUEUE),
                    )?;
                    let summary = timer
                        .finish(merged.len(), 0, out.catalog.len())
                        .with_counter("communities", counts.communities)
                        .with_counter("auto_merged", counts.auto_merged)
                        .with_counter("reviewed", counts.reviewed)
                        .with_counter("embedding_failures", report.failed);
                    state.deduplicated = Some(out);
                    summary
                }
                Stage::Build => {
                    let catalog = &state.require_deduplicated()?.catalog;
                    let unique = state.require_normalized()?.mentions.len();
                    let builder = CatalogBuilder::new(self.config.output.clone(), &self.config.naming.industry);
                    let validation = builder.validate(catalog, unique);
                    let final_catalog = builder.build(catalog);
                    self.store.write(files::FINAL_CATALOG, &final_catalog)?;
                    self.store.write(files::VALIDATION_REPORT, &validation)?;
                    let summary = timer
                        .finish(catalog.len(), 0, final_catalog.total_technologies)
                        .with_counter("warnings", validation.warnings.len());
                    output = Some((final_catalog, validation));
                    summary
                }
            };
            state.summaries.push(summary);
        }

        let (catalog, validation) = output.ok_or_else(|| ArtifactError::NoUpstream {
            stage: Stage::Build.to_string(),
        })?;
        let stats = self.embeddings.cache_stats();
        let summary = RunSummary {
            resolver_version: VERSION.to_string(),
            artifact_schema_version: ARTIFACT_SCHEMA_VERSION.to_string(),
            started_at,
            finished_at: Utc::now(),
            resumed_from,
            stages: state.summaries.clone(),
            embedding_provider: self.embeddings.provider_name().to_string(),
            naming_provider: self.namer_name.clone(),
            embedding_cache_hits: stats.hits,
            embedding_cache_misses: stats.misses,
            validation_passed: validation.passed,
        };
        self.store.write(files::RUN_SUMMARY, &summary)?;
        info!(
            technologies = catalog.total_technologies,
            variants = catalog.total_variants,
            coverage_pct = format!("{:.1}", validation.coverage_pct),
            passed = validation.passed,
            "resolution run complete"
        );
        Ok(RunReport {
            catalog,
            validation,
            summary,
        })
    }
}
