use petgraph::unionfind::UnionFind;

use super::community::{relabel, ICommunityDetector};
use super::graph::SimilarityGraph;

/// Every connected component is one community.
pub struct ConnectedComponents;

impl ICommunityDetector for ConnectedComponents {
    fn detect(&self, graph: &SimilarityGraph) -> Vec<usize> {
        let mut sets = UnionFind::<usize>::new(graph.node_count());
        for (a, b, _) in graph.edges() {
            sets.union(a, b);
        }
        let roots: Vec<usize> = (0..graph.node_count()).map(|i| sets.find(i)).collect();
        relabel(&roots)
    }

    fn name(&self) -> &str {
        "connected-components"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_collapse_into_one_component() {
        let mut g = SimilarityGraph::with_nodes(4);
        g.add_edge(0, 1, 0.9);
        g.add_edge(1, 2, 0.9);
        assert_eq!(ConnectedComponents.detect(&g), vec![0, 0, 0, 1]);
    }
}
