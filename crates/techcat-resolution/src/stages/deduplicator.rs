//! Deduplicator — first-pass consolidation into the working catalog.
//!
//! Step A folds catalog matches onto their technologies. Step B tests each
//! cluster's proposed canonical name against the working catalog, which
//! grows as proposals are minted, and either folds the cluster into the
//! best duplicate or mints a new technology.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use techcat_core::config::MatchingConfig;
use techcat_core::errors::ResolutionError;
use techcat_core::models::{
    CanonicalResult, CanonicalTechnology, Catalog, CatalogMatch, Cluster, DedupOutcome,
    MatchMethod, MergeDecision, MergeOutcome, MergeStage, Provenance, VariantMethod,
};
use techcat_core::text::{normalize_name, slugify};
use tracing::{debug, info, warn};

use crate::algorithms::similarity::meets;
use crate::algorithms::{FusedScorer, VectorLookup};

/// Counts reported alongside a first-pass outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupCounts {
    pub variants_added: usize,
    pub unknown_targets: usize,
    pub folded: usize,
    pub minted: usize,
    pub missing_clusters: usize,
}

pub struct Deduplicator {
    config: MatchingConfig,
}

/// Candidate ordering: higher score, then existing provenance, then more
/// variants, then alphabetically first name.
pub fn prefer(a: (&CanonicalTechnology, f64), b: (&CanonicalTechnology, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| provenance_rank(a.0).cmp(&provenance_rank(b.0)))
        .then_with(|| b.0.variants.len().cmp(&a.0.variants.len()))
        .then_with(|| a.0.canonical_name.cmp(&b.0.canonical_name))
        .then_with(|| a.0.id.cmp(&b.0.id))
}

fn provenance_rank(t: &CanonicalTechnology) -> u8 {
    match t.provenance {
        Provenance::Existing => 0,
        Provenance::Minted => 1,
    }
}

impl Deduplicator {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Texts Step B embeds: normalized proposal names and catalog names.
    pub fn embedding_texts(results: &[CanonicalResult], catalog: &Catalog) -> Vec<String> {
        results
            .iter()
            .map(|r| normalize_name(&r.canonical_name))
            .chain(catalog.technologies.iter().map(|t| normalize_name(&t.canonical_name)))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Step A: fold matches onto their technologies. Idempotent.
    pub fn fold_matches(&self, catalog: &mut Catalog, matches: &[CatalogMatch], counts: &mut DedupCounts) {
        for m in matches {
            let method = match m.method {
                MatchMethod::Exact => VariantMethod::Exact,
                MatchMethod::Fused => VariantMethod::Fused,
            };
            match catalog.get_mut(&m.canonical_id) {
                Some(tech) => {
                    if tech.add_mention(&m.mention, m.score, method) {
                        counts.variants_added += 1;
                    }
                }
                None => {
                    counts.unknown_targets += 1;
                    let err = ResolutionError::UnknownTechnology {
                        id: m.canonical_id.clone(),
                    };
                    warn!(mention = %m.mention.name, error = %err, "skipping match");
                }
            }
        }
    }

    /// Run both steps over a copy of `catalog`.
    pub fn deduplicate(
        &self,
        catalog: &Catalog,
        matches: &[CatalogMatch],
        results: &[CanonicalResult],
        clusters: &[Cluster],
        vectors: &dyn VectorLookup,
    ) -> (DedupOutcome, DedupCounts) {
        let mut working = catalog.clone();
        let mut counts = DedupCounts::default();
        self.fold_matches(&mut working, matches, &mut counts);

        let by_id: HashMap<&str, &Cluster> = clusters.iter().map(|c| (c.id.as_str(), c)).collect();
        let scorer = FusedScorer::new(vectors, self.config.fuzzy_weight, self.config.semantic_weight);
        let mut decisions = Vec::new();

        for result in results {
            let Some(cluster) = by_id.get(result.cluster_id.as_str()) else {
                counts.missing_clusters += 1;
                warn!(cluster = %result.cluster_id, "canonical result has no cluster, skipping");
                continue;
            };
            let proposed = normalize_name(&result.canonical_name);

            let duplicate = working
                .technologies
                .iter()
                .map(|t| (t, scorer.score(&proposed, &normalize_name(&t.canonical_name)).score))
                .filter(|(_, s)| meets(*s, self.config.acceptance_threshold))
                .min_by(|a, b| prefer(*a, *b))
                .map(|(t, s)| (t.id.clone(), s));

            match duplicate {
                Some((id, score)) => {
                    let Some(target) = working.get_mut(&id) else {
                        continue;
                    };
                    for member in &cluster.members {
                        if target.add_mention(member, score, VariantMethod::Duplicate) {
                            counts.variants_added += 1;
                        }
                    }
                    counts.folded += 1;
                    debug!(proposal = %result.canonical_name, into = %id, score, "folding duplicate proposal");
                    decisions.push(MergeDecision {
                        stage: MergeStage::FirstPass,
                        from_id: None,
                        from_name: result.canonical_name.clone(),
                        into_id: id,
                        into_name: target.canonical_name.clone(),
                        similarity: score,
                        gates: None,
                        decision: MergeOutcome::Folded,
                        decided_at: Utc::now(),
                    });
                }
                None => {
                    let tech = mint(&working, result, cluster);
                    counts.variants_added += tech.variants.len();
                    counts.minted += 1;
                    working.technologies.push(tech);
                }
            }
        }

        info!(
            matches = matches.len(),
            proposals = results.len(),
            minted = counts.minted,
            folded = counts.folded,
            technologies = working.len(),
            "first-pass deduplication complete"
        );
        (
            DedupOutcome {
                catalog: working,
                decisions,
                review_queue: Vec::new(),
            },
            counts,
        )
    }
}

fn mint(working: &Catalog, result: &CanonicalResult, cluster: &Cluster) -> CanonicalTechnology {
    let mut tech = CanonicalTechnology {
        id: working.unique_id(&slugify(&result.canonical_name)),
        canonical_name: result.canonical_name.clone(),
        domain: result.domain.clone(),
        description: result.description.clone(),
        aliases: Vec::new(),
        variants: Vec::new(),
        occurrence_count: 0,
        source_doc_ids: BTreeSet::new(),
        provenance: Provenance::Minted,
        merged_from: Vec::new(),
    };
    for member in &cluster.members {
        tech.add_mention(member, cluster.avg_similarity, VariantMethod::Cluster);
    }
    tech
}
