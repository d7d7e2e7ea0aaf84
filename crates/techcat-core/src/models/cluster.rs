use serde::{Deserialize, Serialize};

use super::mention::Mention;

/// Fused similarity of one intra-cluster edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimilarity {
    pub a: String,
    pub b: String,
    pub score: f64,
}

/// A community of unmatched mentions believed to name one technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub members: Vec<Mention>,
    /// Edges whose endpoints both lie in this cluster.
    pub similarities: Vec<PairSimilarity>,
    /// Mean edge weight; 1.0 for a singleton.
    pub avg_similarity: f64,
}

impl Cluster {
    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    pub fn total_occurrences(&self) -> u64 {
        self.members.iter().map(|m| m.occurrence_count).sum()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}
