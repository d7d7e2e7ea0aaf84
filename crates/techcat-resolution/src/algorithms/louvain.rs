//! Weighted Louvain modularity maximization.
//!
//! Local moving visits nodes in an order shuffled by a seeded RNG and
//! breaks gain ties toward the lowest community label, so a fixed seed
//! always yields the same partition. Each level then collapses communities
//! into super-nodes until no node moves.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::community::{relabel, ICommunityDetector};
use super::graph::SimilarityGraph;

const GAIN_EPSILON: f64 = 1e-12;

pub struct Louvain {
    seed: u64,
    max_passes: usize,
}

/// Weighted graph at one aggregation level. `loops[i]` holds the weight
/// internal to super-node `i`, counted from both endpoints.
struct Level {
    adjacency: Vec<BTreeMap<usize, f64>>,
    loops: Vec<f64>,
}

impl Level {
    fn from_graph(graph: &SimilarityGraph) -> Self {
        let adjacency = graph
            .adjacency()
            .into_iter()
            .map(|list| list.into_iter().collect())
            .collect();
        Self {
            adjacency,
            loops: vec![0.0; graph.node_count()],
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    fn degree(&self, i: usize) -> f64 {
        self.loops[i] + self.adjacency[i].values().sum::<f64>()
    }

    /// Collapse communities (dense labels) into super-nodes.
    fn aggregate(&self, labels: &[usize], count: usize) -> Self {
        let mut adjacency = vec![BTreeMap::new(); count];
        let mut loops = vec![0.0; count];
        for i in 0..self.len() {
            let ci = labels[i];
            loops[ci] += self.loops[i];
            for (&j, &w) in &self.adjacency[i] {
                let cj = labels[j];
                if ci == cj {
                    loops[ci] += w;
                } else {
                    *adjacency[ci].entry(cj).or_insert(0.0) += w;
                }
            }
        }
        Self { adjacency, loops }
    }
}

impl Louvain {
    pub fn new(seed: u64, max_passes: usize) -> Self {
        Self {
            seed,
            max_passes: max_passes.max(1),
        }
    }

    /// One level of local moving. Returns dense labels and whether any
    /// node changed community.
    fn local_moving(&self, level: &Level, rng: &mut StdRng) -> (Vec<usize>, bool) {
        let n = level.len();
        let degrees: Vec<f64> = (0..n).map(|i| level.degree(i)).collect();
        let total: f64 = degrees.iter().sum();
        let mut community: Vec<usize> = (0..n).collect();
        if total < f64::EPSILON {
            return (community, false);
        }

        let mut community_degree = degrees.clone();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut improved = false;
        for pass in 0..self.max_passes {
            let mut moved = 0usize;
            for &i in &order {
                let current = community[i];
                let k_i = degrees[i];

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for (&j, &w) in &level.adjacency[i] {
                    *links.entry(community[j]).or_insert(0.0) += w;
                }

                community_degree[current] -= k_i;
                let gain = |c: usize, links_to_c: f64| links_to_c - community_degree[c] * k_i / total;

                let mut best = current;
                let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0));
                for (&c, &w) in &links {
                    let g = gain(c, w);
                    if g > best_gain + GAIN_EPSILON || (c < best && (g - best_gain).abs() <= GAIN_EPSILON) {
                        best = c;
                        best_gain = g;
                    }
                }

                community_degree[best] += k_i;
                if best != current {
                    community[i] = best;
                    moved += 1;
                }
            }
            debug!(pass, moved, "louvain local moving pass");
            if moved == 0 {
                break;
            }
            improved = true;
        }
        (relabel(&community), improved)
    }
}

impl ICommunityDetector for Louvain {
    fn detect(&self, graph: &SimilarityGraph) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut membership: Vec<usize> = (0..graph.node_count()).collect();
        let mut level = Level::from_graph(graph);

        for _ in 0..self.max_passes {
            let (labels, improved) = self.local_moving(&level, &mut rng);
            if !improved {
                break;
            }
            for m in membership.iter_mut() {
                *m = labels[*m];
            }
            let count = labels.iter().max().map_or(0, |m| m + 1);
            level = level.aggregate(&labels, count);
        }
        relabel(&membership)
    }

    fn name(&self) -> &str {
        "louvain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> SimilarityGraph {
        let mut g = SimilarityGraph::with_nodes(6);
        for (a, b) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
            g.add_edge(a, b, 0.9);
        }
        g.add_edge(2, 3, 0.86);
        g
    }

    #[test]
    fn separates_loosely_bridged_triangles() {
        let labels = Louvain::new(42, 50).detect(&two_triangles());
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn isolated_nodes_stay_singletons() {
        let g = SimilarityGraph::with_nodes(3);
        assert_eq!(Louvain::new(1, 10).detect(&g), vec![0, 1, 2]);
    }

    #[test]
    fn same_seed_same_partition() {
        let g = two_triangles();
        let a = Louvain::new(7, 50).detect(&g);
        let b = Louvain::new(7, 50).detect(&g);
        assert_eq!(a, b);
    }

    #[test]
    fn single_edge_forms_one_community() {
        let mut g = SimilarityGraph::with_nodes(3);
        g.add_edge(0, 1, 0.9);
        assert_eq!(Louvain::new(42, 50).detect(&g), vec![0, 0, 1]);
    }
}
