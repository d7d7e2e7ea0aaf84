//! CatalogMatcher — exact then fused matching against the catalog.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use techcat_core::config::MatchingConfig;
use techcat_core::models::{
    CanonicalTechnology, Catalog, CatalogMatch, MatchConfidence, MatchMethod, MatchOutcome,
    Mention,
};
use techcat_core::text::normalize_name;
use tracing::info;

use crate::algorithms::similarity::meets;
use crate::algorithms::{FusedScore, FusedScorer, VectorLookup};

/// Fused matches at or above this score are reported as high confidence.
const HIGH_CONFIDENCE_SCORE: f64 = 0.95;

pub struct CatalogMatcher {
    config: MatchingConfig,
}

/// Normalized match names of one catalog technology.
struct Candidate<'a> {
    id: &'a str,
    canonical_name: &'a str,
    names: Vec<String>,
}

impl<'a> Candidate<'a> {
    /// Each distinct normalized name appears once, wherever it repeats.
    fn of(t: &'a CanonicalTechnology) -> Self {
        let names: BTreeSet<String> = t
            .match_names()
            .into_iter()
            .map(normalize_name)
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            id: &t.id,
            canonical_name: &t.canonical_name,
            names: names.into_iter().collect(),
        }
    }
}

impl CatalogMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Every text the fused step embeds: mention names and the normalized
    /// canonical names, aliases and variants of the catalog.
    pub fn embedding_texts(mentions: &[Mention], catalog: &Catalog) -> Vec<String> {
        let mut texts: Vec<String> = mentions.iter().map(|m| m.name.clone()).collect();
        for tech in &catalog.technologies {
            texts.extend(tech.match_names().into_iter().map(normalize_name));
        }
        texts.retain(|t| !t.is_empty());
        texts
    }

    /// Partition `mentions` into matched and unmatched, preserving input
    /// order within each list.
    pub fn match_all(
        &self,
        mentions: &[Mention],
        catalog: &Catalog,
        vectors: &dyn VectorLookup,
    ) -> MatchOutcome {
        let candidates: Vec<Candidate<'_>> = catalog.technologies.iter().map(Candidate::of).collect();

        let mut exact: HashMap<&str, usize> = HashMap::new();
        for (pos, c) in candidates.iter().enumerate() {
            for name in &c.names {
                exact.entry(name.as_str()).or_insert(pos);
            }
        }

        let scorer = FusedScorer::new(vectors, self.config.fuzzy_weight, self.config.semantic_weight);
        let results: Vec<Option<CatalogMatch>> = mentions
            .par_iter()
            .map(|m| self.match_one(m, &candidates, &exact, &scorer))
            .collect();

        let mut outcome = MatchOutcome::default();
        let mut exact_count = 0usize;
        for (mention, result) in mentions.iter().zip(results) {
            match result {
                Some(hit) => {
                    if hit.method == MatchMethod::Exact {
                        exact_count += 1;
                    }
                    outcome.matched.push(hit);
                }
                None => outcome.unmatched.push(mention.clone()),
            }
        }

        info!(
            processed = mentions.len(),
            matched = outcome.matched.len(),
            exact = exact_count,
            unmatched = outcome.unmatched.len(),
            "catalog matching complete"
        );
        outcome
    }

    fn match_one(
        &self,
        mention: &Mention,
        candidates: &[Candidate<'_>],
        exact: &HashMap<&str, usize>,
        scorer: &FusedScorer<'_>,
    ) -> Option<CatalogMatch> {
        if let Some(&pos) = exact.get(mention.name.as_str()) {
            let c = &candidates[pos];
            return Some(build_match(
                mention,
                c,
                FusedScore {
                    fuzzy: 1.0,
                    semantic: 1.0,
                    score: 1.0,
                },
                MatchMethod::Exact,
            ));
        }

        let mut best: Option<(&Candidate<'_>, FusedScore)> = None;
        for c in candidates {
            let Some(top) = c
                .names
                .iter()
                .map(|n| scorer.score(&mention.name, n))
                .max_by(|a, b| a.score.total_cmp(&b.score))
            else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((held, s)) => {
                    top.score > s.score || (top.score == s.score && c.id < held.id)
                }
            };
            if better {
                best = Some((c, top));
            }
        }

        let (c, score) = best?;
        if !meets(score.score, self.config.acceptance_threshold) {
            return None;
        }
        Some(build_match(mention, c, score, MatchMethod::Fused))
    }
}

fn build_match(mention: &Mention, c: &Candidate<'_>, score: FusedScore, method: MatchMethod) -> CatalogMatch {
    let confidence = if method == MatchMethod::Exact || score.score >= HIGH_CONFIDENCE_SCORE {
        MatchConfidence::High
    } else {
        MatchConfidence::Medium
    };
    CatalogMatch {
        mention: mention.clone(),
        canonical_id: c.id.to_string(),
        canonical_name: c.canonical_name.to_string(),
        score: score.score,
        fuzzy_score: score.fuzzy,
        semantic_score: score.semantic,
        method,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use techcat_core::models::CatalogEntry;

    fn catalog() -> Catalog {
        Catalog::from_entries(&[
            CatalogEntry {
                id: "tiltrotor".to_string(),
                name: "Tiltrotor".to_string(),
                domain: Some("Propulsion".to_string()),
                description: None,
                aliases: vec!["Tilt Rotor".to_string()],
            },
            CatalogEntry {
                id: "solid_state_battery".to_string(),
                name: "Solid-State Battery".to_string(),
                domain: Some("Energy Storage".to_string()),
                description: None,
                aliases: vec![],
            },
        ])
    }

    fn no_vectors() -> HashMap<String, Arc<Vec<f32>>> {
        HashMap::new()
    }

    #[test]
    fn exact_match_on_alias_is_case_insensitive() {
        let matcher = CatalogMatcher::new(MatchingConfig::default());
        let out = matcher.match_all(&[Mention::bare("tilt rotor", 2)], &catalog(), &no_vectors());
        assert_eq!(out.matched.len(), 1);
        let hit = &out.matched[0];
        assert_eq!(hit.canonical_id, "tiltrotor");
        assert_eq!(hit.method, MatchMethod::Exact);
        assert_eq!(hit.score, 1.0);
        assert_eq!(hit.confidence, MatchConfidence::High);
    }

    #[test]
    fn fused_match_uses_both_signals() {
        let mut vectors = no_vectors();
        vectors.insert("solid-state batteries".to_string(), Arc::new(vec![1.0, 0.0]));
        vectors.insert("solid-state battery".to_string(), Arc::new(vec![1.0, 0.0]));
        let matcher = CatalogMatcher::new(MatchingConfig::default());
        let out = matcher.match_all(&[Mention::bare("solid-state batteries", 1)], &catalog(), &vectors);
        assert_eq!(out.matched.len(), 1);
        let hit = &out.matched[0];
        assert_eq!(hit.method, MatchMethod::Fused);
        assert_eq!(hit.canonical_id, "solid_state_battery");
        assert!(hit.score >= 0.85);
    }

    #[test]
    fn fuzzy_alone_below_threshold_is_unmatched() {
        let matcher = CatalogMatcher::new(MatchingConfig::default());
        let out = matcher.match_all(&[Mention::bare("solid-state batteries", 1)], &catalog(), &no_vectors());
        assert!(out.matched.is_empty());
        assert_eq!(out.unmatched.len(), 1);
    }

    #[test]
    fn empty_catalog_leaves_everything_unmatched() {
        let matcher = CatalogMatcher::new(MatchingConfig::default());
        let mentions = vec![Mention::bare("a", 1), Mention::bare("b", 1)];
        let out = matcher.match_all(&mentions, &Catalog::default(), &no_vectors());
        assert_eq!(out.unmatched, mentions);
    }

    #[test]
    fn acceptance_threshold_is_inclusive() {
        let config = MatchingConfig {
            fuzzy_weight: 1.0,
            semantic_weight: 0.0,
            acceptance_threshold: 0.9,
        };
        // "abcdefghij" vs "abcdefghix": one substitution in ten characters.
        let catalog = Catalog::from_entries(&[CatalogEntry {
            id: "t".to_string(),
            name: "abcdefghij".to_string(),
            domain: None,
            description: None,
            aliases: vec![],
        }]);
        let matcher = CatalogMatcher::new(config);
        let out = matcher.match_all(&[Mention::bare("abcdefghix", 1)], &catalog, &no_vectors());
        assert_eq!(out.matched.len(), 1);
        assert!((out.matched[0].score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn repeated_names_are_scored_once() {
        let catalog = Catalog::from_entries(&[CatalogEntry {
            id: "dep".to_string(),
            name: "Distributed Electric Propulsion".to_string(),
            domain: Some("Propulsion".to_string()),
            description: None,
            aliases: vec![
                "DEP".to_string(),
                "distributed electric propulsion".to_string(),
                "dep".to_string(),
            ],
        }]);
        let candidate = Candidate::of(&catalog.technologies[0]);
        assert_eq!(
            candidate.names,
            vec!["dep".to_string(), "distributed electric propulsion".to_string()]
        );
    }

    #[test]
    fn embedding_texts_cover_catalog_names() {
        let texts = CatalogMatcher::embedding_texts(&[Mention::bare("x", 1)], &catalog());
        assert!(texts.contains(&"x".to_string()));
        assert!(texts.contains(&"tilt rotor".to_string()));
        assert!(texts.contains(&"solid-state battery".to_string()));
    }
}
