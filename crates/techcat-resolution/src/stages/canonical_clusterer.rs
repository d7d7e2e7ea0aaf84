//! CanonicalNameClusterer — second-pass, quality-gated merge.
//!
//! Disjoint first-pass clusters can still produce two names for one
//! concept. This pass re-clusters the catalog at the canonical level over
//! `name + domain + description prefix`, then walks each multi-member
//! community against a running primary. Each pair passes through the
//! domain gate, the variant-overlap gate and the confidence tier.
//!
//! Members rejected against the primary stay standalone and are not
//! retried against other members of the same community.

use std::cmp::Ordering;

use chrono::Utc;
use techcat_core::config::CanonicalConfig;
use techcat_core::constants::UNKNOWN_DOMAIN;
use techcat_core::models::{
    CanonicalTechnology, Catalog, ConfidenceTier, DedupOutcome, DomainGate, GateResults,
    MergeDecision, MergeOutcome, MergeStage, ReviewRecord,
};
use techcat_core::text::token_set;
use tracing::{debug, info};

use super::clusterer::build_similarity_graph;
use super::deduplicator::prefer;
use crate::algorithms::{meets, partition, FusedScorer, ICommunityDetector, VectorLookup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecondPassCounts {
    pub communities: usize,
    pub multi_member: usize,
    pub auto_merged: usize,
    pub reviewed: usize,
}

pub struct CanonicalNameClusterer {
    config: CanonicalConfig,
    detector: Box<dyn ICommunityDetector>,
}

pub fn domain_gate(a: &str, b: &str, related: &[(String, String)]) -> DomainGate {
    if a.eq_ignore_ascii_case(b) {
        return DomainGate::Identical;
    }
    if a.eq_ignore_ascii_case(UNKNOWN_DOMAIN) || b.eq_ignore_ascii_case(UNKNOWN_DOMAIN) {
        return DomainGate::Unknown;
    }
    let related_pair = related.iter().any(|(x, y)| {
        (x.eq_ignore_ascii_case(a) && y.eq_ignore_ascii_case(b))
            || (x.eq_ignore_ascii_case(b) && y.eq_ignore_ascii_case(a))
    });
    if related_pair {
        DomainGate::Related
    } else {
        DomainGate::Incompatible
    }
}

/// Tokens of a technology's variant names. A technology without variants
/// contributes its canonical name and aliases instead.
fn vocabulary(t: &CanonicalTechnology) -> std::collections::BTreeSet<String> {
    if t.variants.is_empty() {
        token_set(std::iter::once(t.canonical_name.as_str()).chain(t.aliases.iter().map(String::as_str)))
    } else {
        token_set(t.variants.iter().map(|v| v.name.as_str()))
    }
}

/// `|A ∩ B| / max(|A|, |B|)` over variant-name tokens.
pub fn variant_overlap(a: &CanonicalTechnology, b: &CanonicalTechnology) -> f64 {
    let (va, vb) = (vocabulary(a), vocabulary(b));
    let denom = va.len().max(vb.len());
    if denom == 0 {
        return 0.0;
    }
    va.intersection(&vb).count() as f64 / denom as f64
}

pub fn decide(gates: &GateResults) -> MergeOutcome {
    match gates.tier {
        ConfidenceTier::High => MergeOutcome::AutoMerge,
        ConfidenceTier::Medium if gates.domain_passed && gates.variant_overlap_passed => {
            MergeOutcome::AutoMerge
        }
        _ => MergeOutcome::Review,
    }
}

fn review_reason(gates: &GateResults, a: &CanonicalTechnology, b: &CanonicalTechnology, min_overlap: f64) -> String {
    let mut reasons = Vec::new();
    if gates.tier == ConfidenceTier::Low {
        reasons.push("low confidence tier".to_string());
    }
    if !gates.domain_passed {
        reasons.push(format!("incompatible domains ({} vs {})", a.domain, b.domain));
    }
    if !gates.variant_overlap_passed {
        reasons.push(format!(
            "variant overlap {:.2} below {:.2}",
            gates.variant_overlap, min_overlap
        ));
    }
    reasons.join("; ")
}

impl CanonicalNameClusterer {
    pub fn new(config: CanonicalConfig, detector: Box<dyn ICommunityDetector>) -> Self {
        Self { config, detector }
    }

    /// The embedded text: canonical name, domain and description prefix.
    pub fn representation(&self, t: &CanonicalTechnology) -> String {
        let prefix: String = t.description.chars().take(self.config.description_prefix_chars).collect();
        [t.canonical_name.as_str(), t.domain.as_str(), prefix.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn embedding_texts(&self, catalog: &Catalog) -> Vec<String> {
        catalog.technologies.iter().map(|t| self.representation(t)).collect()
    }

    pub fn tier(&self, similarity: f64) -> ConfidenceTier {
        if meets(similarity, self.config.high_tier) {
            ConfidenceTier::High
        } else if meets(similarity, self.config.medium_tier) {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn evaluate_gates(&self, similarity: f64, a: &CanonicalTechnology, b: &CanonicalTechnology) -> GateResults {
        let domain = domain_gate(&a.domain, &b.domain, &self.config.related_domains);
        let overlap = variant_overlap(a, b);
        GateResults {
            domain,
            domain_passed: domain.passed(),
            variant_overlap: overlap,
            variant_overlap_passed: meets(overlap, self.config.min_variant_overlap),
            tier: self.tier(similarity),
        }
    }

    pub fn merge(&self, catalog: &Catalog, vectors: &dyn VectorLookup) -> (DedupOutcome, SecondPassCounts) {
        let techs = &catalog.technologies;
        let names: Vec<String> = techs.iter().map(|t| t.canonical_name.clone()).collect();
        let reps = self.embedding_texts(catalog);
        let scorer = FusedScorer::new(vectors, self.config.fuzzy_weight, self.config.semantic_weight);
        let graph = build_similarity_graph(
            &names,
            &reps,
            vectors,
            &scorer,
            self.config.top_k,
            self.config.edge_threshold,
        );
        let communities = partition(&self.detector.detect(&graph));

        let mut counts = SecondPassCounts {
            communities: communities.len(),
            ..Default::default()
        };
        let mut slots: Vec<Option<CanonicalTechnology>> = techs.iter().cloned().map(Some).collect();
        let mut decisions = Vec::new();
        let mut review_queue = Vec::new();

        for (community_id, members) in communities.iter().enumerate() {
            if members.len() < 2 {
                continue;
            }
            counts.multi_member += 1;
            let mut primary = members[0];

            for &candidate in &members[1..] {
                let (Some(p), Some(c)) = (slots[primary].as_ref(), slots[candidate].as_ref()) else {
                    continue;
                };
                let similarity = scorer
                    .score_with_texts(&names[primary], &reps[primary], &names[candidate], &reps[candidate])
                    .score;
                let gates = self.evaluate_gates(similarity, p, c);
                let outcome = decide(&gates);

                if outcome == MergeOutcome::Review {
                    let reason = review_reason(&gates, p, c, self.config.min_variant_overlap);
                    debug!(primary = %p.id, candidate = %c.id, similarity, %reason, "queueing pair for review");
                    let now = Utc::now();
                    decisions.push(MergeDecision {
                        stage: MergeStage::SecondPass,
                        from_id: Some(c.id.clone()),
                        from_name: c.canonical_name.clone(),
                        into_id: p.id.clone(),
                        into_name: p.canonical_name.clone(),
                        similarity,
                        gates: Some(gates.clone()),
                        decision: MergeOutcome::Review,
                        decided_at: now,
                    });
                    review_queue.push(ReviewRecord {
                        community_id,
                        primary_id: p.id.clone(),
                        primary_name: p.canonical_name.clone(),
                        candidate_id: c.id.clone(),
                        candidate_name: c.canonical_name.clone(),
                        similarity,
                        gates,
                        reason,
                        queued_at: now,
                    });
                    counts.reviewed += 1;
                    continue;
                }

                let (winner, loser) = if prefer((p, 0.0), (c, 0.0)) != Ordering::Greater {
                    (primary, candidate)
                } else {
                    (candidate, primary)
                };
                let (Some(retired), Some(survivor)) = (slots[loser].take(), slots[winner].as_mut()) else {
                    continue;
                };
                decisions.push(MergeDecision {
                    stage: MergeStage::SecondPass,
                    from_id: Some(retired.id.clone()),
                    from_name: retired.canonical_name.clone(),
                    into_id: survivor.id.clone(),
                    into_name: survivor.canonical_name.clone(),
                    similarity,
                    gates: Some(gates),
                    decision: MergeOutcome::AutoMerge,
                    decided_at: Utc::now(),
                });
                debug!(from = %retired.id, into = %survivor.id, similarity, "auto-merging canonical pair");
                survivor.absorb(retired, similarity, MergeStage::SecondPass);
                counts.auto_merged += 1;
                primary = winner;
            }
        }

        let catalog = Catalog {
            technologies: slots.into_iter().flatten().collect(),
        };
        info!(
            communities = counts.communities,
            multi_member = counts.multi_member,
            auto_merged = counts.auto_merged,
            reviewed = counts.reviewed,
            technologies = catalog.len(),
            "canonical-name deduplication complete"
        );
        (
            DedupOutcome {
                catalog,
                decisions,
                review_queue,
            },
            counts,
        )
    }
}
