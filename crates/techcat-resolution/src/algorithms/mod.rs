//! Scoring and graph algorithms shared by the matching, clustering and
//! second-pass stages. Everything here is synchronous.

pub mod community;
pub mod components;
pub mod graph;
pub mod keyword_index;
pub mod louvain;
pub mod similarity;

pub use community::{detector_for, partition, ICommunityDetector};
pub use components::ConnectedComponents;
pub use graph::SimilarityGraph;
pub use keyword_index::KeywordIndex;
pub use louvain::Louvain;
pub use similarity::{cosine_similarity, fuzzy_similarity, meets, FusedScore, FusedScorer, VectorLookup};
