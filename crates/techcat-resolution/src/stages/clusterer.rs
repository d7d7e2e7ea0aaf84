//! HybridClusterer — groups unmatched mentions into clusters.
//!
//! Candidates for each mention come from two retrievals, keyword overlap
//! and embedding nearest neighbours (top-K each). Every candidate pair is
//! scored with the fused scorer and becomes an edge at or above the edge
//! threshold. Communities of the resulting graph are the clusters.

use std::collections::BTreeSet;
use std::sync::Arc;

use rayon::prelude::*;
use techcat_core::config::ClusteringConfig;
use techcat_core::models::{Cluster, Mention, PairSimilarity};
use tracing::info;

use crate::algorithms::similarity::meets;
use crate::algorithms::{
    cosine_similarity, partition, FusedScorer, ICommunityDetector, KeywordIndex, SimilarityGraph,
    VectorLookup,
};

pub struct HybridClusterer {
    config: ClusteringConfig,
    detector: Box<dyn ICommunityDetector>,
}

/// Build the fused similarity graph over `names`. Fuzzy compares `names`,
/// semantic compares `texts`; both are parallel to the node positions.
pub(crate) fn build_similarity_graph(
    names: &[String],
    texts: &[String],
    vectors: &dyn VectorLookup,
    scorer: &FusedScorer<'_>,
    top_k: usize,
    edge_threshold: f64,
) -> SimilarityGraph {
    let index = KeywordIndex::build(names);
    let embedded: Vec<Option<Arc<Vec<f32>>>> =
        texts.iter().map(|t| vectors.vector(t)).collect();

    let edges: Vec<(usize, usize, f64)> = (0..names.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut candidates: BTreeSet<usize> = index.candidates(i, top_k).into_iter().collect();
            candidates.extend(nearest_neighbours(i, &embedded, top_k));
            candidates
                .into_iter()
                .filter_map(|j| {
                    let s = scorer.score_with_texts(&names[i], &texts[i], &names[j], &texts[j]);
                    meets(s.score, edge_threshold).then_some((i.min(j), i.max(j), s.score))
                })
                .collect::<Vec<_>>()
        })
        .collect();

    // A pair discovered from both sides collapses to one edge here.
    let mut graph = SimilarityGraph::with_nodes(names.len());
    for (a, b, w) in edges {
        graph.add_edge(a, b, w);
    }
    graph
}

fn nearest_neighbours(i: usize, embedded: &[Option<Arc<Vec<f32>>>], top_k: usize) -> Vec<usize> {
    let Some(own) = embedded[i].as_ref() else {
        return Vec::new();
    };
    let mut scored: Vec<(usize, f64)> = embedded
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .filter_map(|(j, v)| v.as_ref().map(|v| (j, cosine_similarity(own, v))))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().take(top_k).map(|(j, _)| j).collect()
}

impl HybridClusterer {
    pub fn new(config: ClusteringConfig, detector: Box<dyn ICommunityDetector>) -> Self {
        Self { config, detector }
    }

    pub fn embedding_texts(mentions: &[Mention]) -> Vec<String> {
        mentions.iter().map(|m| m.name.clone()).collect()
    }

    /// Cluster the unmatched mentions. Every mention lands in exactly one
    /// cluster; isolated mentions become singletons.
    pub fn cluster(&self, mentions: &[Mention], vectors: &dyn VectorLookup) -> Vec<Cluster> {
        let names = Self::embedding_texts(mentions);
        let scorer = FusedScorer::new(vectors, self.config.fuzzy_weight, self.config.semantic_weight);
        let graph = build_similarity_graph(
            &names,
            &names,
            vectors,
            &scorer,
            self.config.top_k,
            self.config.edge_threshold,
        );
        let labels = self.detector.detect(&graph);

        let mut groups = partition(&labels);
        groups.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| mentions[a[0]].name.cmp(&mentions[b[0]].name))
        });

        let clusters: Vec<Cluster> = groups
            .iter()
            .enumerate()
            .map(|(n, members)| build_cluster(n + 1, members, mentions, &graph))
            .collect();

        info!(
            mentions = mentions.len(),
            edges = graph.edge_count(),
            clusters = clusters.len(),
            singletons = clusters.iter().filter(|c| c.is_singleton()).count(),
            detector = self.detector.name(),
            "hybrid clustering complete"
        );
        clusters
    }
}

fn build_cluster(number: usize, members: &[usize], mentions: &[Mention], graph: &SimilarityGraph) -> Cluster {
    let mut similarities = Vec::new();
    for (x, &a) in members.iter().enumerate() {
        for &b in &members[x + 1..] {
            if let Some(score) = graph.weight(a, b) {
                similarities.push(PairSimilarity {
                    a: mentions[a].name.clone(),
                    b: mentions[b].name.clone(),
                    score,
                });
            }
        }
    }
    let avg_similarity = if members.len() == 1 {
        1.0
    } else if similarities.is_empty() {
        0.0
    } else {
        similarities.iter().map(|s| s.score).sum::<f64>() / similarities.len() as f64
    };
    Cluster {
        id: format!("cluster_{number:04}"),
        members: members.iter().map(|&i| mentions[i].clone()).collect(),
        similarities,
        avg_similarity,
    }
}
