//! Pluggable community detection: `detect(graph) -> partition`.

use techcat_core::config::ClusteringConfig;

use super::components::ConnectedComponents;
use super::graph::SimilarityGraph;
use super::louvain::Louvain;

/// Partitions a similarity graph. Implementations must be deterministic
/// for a fixed configuration.
pub trait ICommunityDetector: Send + Sync {
    /// One community label per node. Labels are dense, numbered in order of
    /// each community's lowest node.
    fn detect(&self, graph: &SimilarityGraph) -> Vec<usize>;

    fn name(&self) -> &str;
}

/// Build the detector named by `community_algorithm`. Unknown names are
/// rejected by config validation, so they fall back to Louvain here.
pub fn detector_for(config: &ClusteringConfig) -> Box<dyn ICommunityDetector> {
    match config.community_algorithm.as_str() {
        "components" => Box::new(ConnectedComponents),
        _ => Box::new(Louvain::new(config.seed, config.max_passes)),
    }
}

/// Renumber arbitrary labels densely by first appearance.
pub(crate) fn relabel(labels: &[usize]) -> Vec<usize> {
    let mut mapping = std::collections::HashMap::new();
    labels
        .iter()
        .map(|l| {
            let next = mapping.len();
            *mapping.entry(*l).or_insert(next)
        })
        .collect()
}

/// Group node positions by label, in label order.
pub fn partition(labels: &[usize]) -> Vec<Vec<usize>> {
    let count = labels.iter().max().map_or(0, |m| m + 1);
    let mut groups = vec![Vec::new(); count];
    for (node, &label) in labels.iter().enumerate() {
        groups[label].push(node);
    }
    groups.retain(|g| !g.is_empty());
    groups
}
