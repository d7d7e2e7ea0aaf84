//! Property tests for techcat-resolution.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use proptest::prelude::*;

use techcat_core::config::{MatchingConfig, OutputConfig};
use techcat_core::models::{
    CanonicalTechnology, Catalog, CatalogEntry, MergeStage, Mention, Provenance, RawMention,
    VariantMethod,
};
use techcat_core::text::normalize_name;

use techcat_resolution::algorithms::{ICommunityDetector, Louvain, SimilarityGraph};
use techcat_resolution::stages::deduplicator::prefer;
use techcat_resolution::{CatalogBuilder, CatalogMatcher, MentionNormalizer};

fn raw_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z]{2,8}( [A-Za-z]{2,8}){0,2}",
        "[a-z]{2,6}-[A-Z]{2,6}",
        " {0,2}[A-Za-z0-9+/]{1,10}[!?.,]{0,2} {0,2}",
        "[!?.,]{1,3}",
    ]
}

fn raw_mentions() -> impl Strategy<Value = Vec<RawMention>> {
    prop::collection::vec(
        (proptest::option::weighted(0.9, raw_name()), 0.0f64..1.0),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(name, strength)| RawMention {
                name,
                strength: Some(strength),
                ..Default::default()
            })
            .collect()
    })
}

fn technology(id: usize, variants: &[String], count: u64, provenance: Provenance) -> CanonicalTechnology {
    let mut t = CanonicalTechnology {
        id: format!("tech_{id}"),
        canonical_name: format!("Technology {id}"),
        domain: "Software".to_string(),
        description: String::new(),
        aliases: vec![],
        variants: vec![],
        occurrence_count: 0,
        source_doc_ids: BTreeSet::new(),
        provenance,
        merged_from: vec![],
    };
    for v in variants {
        t.add_mention(&Mention::bare(normalize_name(v), count), 1.0, VariantMethod::Cluster);
    }
    t
}

proptest! {
    #[test]
    fn prop_normalization_preserves_name_set(raw in raw_mentions()) {
        let out = MentionNormalizer::new().normalize(&raw);

        let expected: BTreeSet<String> = raw
            .iter()
            .filter_map(|r| r.name.as_deref())
            .map(normalize_name)
            .filter(|n| !n.is_empty())
            .collect();
        let got: BTreeSet<String> = out.mentions.iter().map(|m| m.name.clone()).collect();
        prop_assert_eq!(&got, &expected);
        prop_assert_eq!(got.len(), out.mentions.len());

        let counted: u64 = out.mentions.iter().map(|m| m.occurrence_count).sum();
        prop_assert_eq!(counted as usize + out.skipped_missing_name, raw.len());
        prop_assert_eq!(out.processed, raw.len());

        for m in &out.mentions {
            prop_assert_eq!(normalize_name(&m.name), m.name.clone());
            prop_assert!((0.0..=1.0).contains(&m.avg_strength));
        }
    }

    #[test]
    fn prop_normalization_is_idempotent(raw in raw_mentions()) {
        let normalizer = MentionNormalizer::new();
        let first = normalizer.normalize(&raw);
        let replayed: Vec<RawMention> = first
            .mentions
            .iter()
            .flat_map(|m| (0..m.occurrence_count).map(|_| RawMention::new(m.name.clone())))
            .collect();
        let second = normalizer.normalize(&replayed);

        let first_counts: Vec<(String, u64)> =
            first.mentions.iter().map(|m| (m.name.clone(), m.occurrence_count)).collect();
        let second_counts: Vec<(String, u64)> =
            second.mentions.iter().map(|m| (m.name.clone(), m.occurrence_count)).collect();
        prop_assert_eq!(first_counts, second_counts);
    }

    #[test]
    fn prop_matching_partitions_every_mention(
        names in prop::collection::btree_set("[a-z]{3,8}( [a-z]{3,8})?", 1..20),
        catalog_size in 0usize..6,
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mentions: Vec<Mention> = names.iter().map(|n| Mention::bare(n.clone(), 1)).collect();
        let entries: Vec<CatalogEntry> = names
            .iter()
            .take(catalog_size)
            .enumerate()
            .map(|(i, n)| CatalogEntry {
                id: format!("entry_{i}"),
                name: n.to_uppercase(),
                domain: None,
                description: None,
                aliases: vec![],
            })
            .collect();
        let catalog = Catalog::from_entries(&entries);
        let vectors: HashMap<String, Arc<Vec<f32>>> = HashMap::new();

        let out = CatalogMatcher::new(MatchingConfig::default()).match_all(&mentions, &catalog, &vectors);

        prop_assert_eq!(out.matched.len() + out.unmatched.len(), mentions.len());
        for m in &out.matched {
            prop_assert!(catalog.contains_id(&m.canonical_id));
        }
        let matched: BTreeSet<&str> = out.matched.iter().map(|m| m.mention.name.as_str()).collect();
        for entry in &entries {
            prop_assert!(matched.contains(normalize_name(&entry.name).as_str()));
        }
    }

    #[test]
    fn prop_absorb_conserves_occurrences_and_variants(
        left in prop::collection::btree_set("[a-z]{3,6}", 0..6),
        right in prop::collection::btree_set("[a-z]{3,6}", 0..6),
        count in 1u64..50,
    ) {
        let left: Vec<String> = left.into_iter().collect();
        let right: Vec<String> = right.into_iter().collect();
        let mut survivor = technology(1, &left, count, Provenance::Existing);
        let retired = technology(2, &right, count, Provenance::Minted);
        let total = survivor.occurrence_count + retired.occurrence_count;
        let union: BTreeSet<String> = left.iter().chain(right.iter()).cloned().collect();

        survivor.absorb(retired, 0.9, MergeStage::SecondPass);

        prop_assert_eq!(survivor.occurrence_count, total);
        let variants: BTreeSet<String> = survivor.variants.iter().map(|v| v.normalized.clone()).collect();
        prop_assert_eq!(variants, union);
        prop_assert_eq!(survivor.merged_from.len(), 1);
        prop_assert_eq!(survivor.merged_from[0].id.as_deref(), Some("tech_2"));
    }

    #[test]
    fn prop_coverage_is_a_percentage(
        groups in prop::collection::vec(prop::collection::btree_set("[a-z]{3,6}", 0..5), 0..6),
        unique in 0usize..30,
    ) {
        let catalog = Catalog {
            technologies: groups
                .iter()
                .enumerate()
                .map(|(i, g)| technology(i, &g.iter().cloned().collect::<Vec<_>>(), 1, Provenance::Minted))
                .collect(),
        };
        let report = CatalogBuilder::new(OutputConfig::default(), "eVTOL").validate(&catalog, unique);

        prop_assert!(report.coverage_pct >= 0.0);
        prop_assert!(report.coverage_pct <= 100.0);
        if unique == 0 {
            prop_assert_eq!(report.coverage_pct, 100.0);
        }
    }

    #[test]
    fn prop_candidate_preference_is_a_total_order(
        score_a in 0.0f64..1.0,
        score_b in 0.0f64..1.0,
        existing_a in any::<bool>(),
        existing_b in any::<bool>(),
        variants_a in prop::collection::btree_set("[a-z]{3,6}", 0..4),
        variants_b in prop::collection::btree_set("[a-z]{3,6}", 0..4),
    ) {
        let provenance = |existing: bool| if existing { Provenance::Existing } else { Provenance::Minted };
        let a = technology(1, &variants_a.into_iter().collect::<Vec<_>>(), 1, provenance(existing_a));
        let b = technology(2, &variants_b.into_iter().collect::<Vec<_>>(), 1, provenance(existing_b));

        let ab = prefer((&a, score_a), (&b, score_b));
        let ba = prefer((&b, score_b), (&a, score_a));
        prop_assert_eq!(ab, ba.reverse());
        prop_assert_ne!(ab, std::cmp::Ordering::Equal);
    }

    #[test]
    fn prop_louvain_is_deterministic_for_a_seed(
        n in 1usize..25,
        edges in prop::collection::vec((0usize..25, 0usize..25, 0.5f64..1.0), 0..60),
        seed in any::<u64>(),
    ) {
        let mut graph = SimilarityGraph::with_nodes(n);
        for (a, b, w) in edges {
            if a < n && b < n {
                graph.add_edge(a, b, w);
            }
        }
        let first = Louvain::new(seed, 50).detect(&graph);
        let second = Louvain::new(seed, 50).detect(&graph);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), n);
        // Nodes without edges never share a community.
        let adjacency = graph.adjacency();
        for (node, neighbours) in adjacency.iter().enumerate() {
            if neighbours.is_empty() {
                let shared = first.iter().filter(|&&l| l == first[node]).count();
                prop_assert_eq!(shared, 1);
            }
        }
    }
}
