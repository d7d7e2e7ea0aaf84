//! Undirected weighted similarity graph over item positions.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

pub struct SimilarityGraph {
    graph: UnGraph<usize, f64>,
}

impl SimilarityGraph {
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = UnGraph::with_capacity(n, n);
        for i in 0..n {
            graph.add_node(i);
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add or keep one edge per unordered pair. Self-edges are ignored and
    /// a repeated pair keeps the larger weight.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        if a == b || a >= self.node_count() || b >= self.node_count() {
            return;
        }
        let (na, nb) = (NodeIndex::new(a), NodeIndex::new(b));
        match self.graph.find_edge(na, nb) {
            Some(e) => {
                if let Some(w) = self.graph.edge_weight_mut(e) {
                    *w = w.max(weight);
                }
            }
            None => {
                self.graph.add_edge(na, nb, weight);
            }
        }
    }

    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    /// Every edge as `(low, high, weight)`, sorted by endpoints.
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut edges: Vec<(usize, usize, f64)> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                (a.min(b), a.max(b), *e.weight())
            })
            .collect();
        edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        edges
    }

    /// Symmetric adjacency lists, neighbors sorted by position.
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.node_count()];
        for (a, b, w) in self.edges() {
            adjacency[a].push((b, w));
            adjacency[b].push((a, w));
        }
        for list in &mut adjacency {
            list.sort_by_key(|(j, _)| *j);
        }
        adjacency
    }
}
