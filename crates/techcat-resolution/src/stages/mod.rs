//! The six resolution stages, in pipeline order.

pub mod builder;
pub mod canonical_clusterer;
pub mod clusterer;
pub mod deduplicator;
pub mod matcher;
pub mod normalizer;

pub use builder::CatalogBuilder;
pub use canonical_clusterer::CanonicalNameClusterer;
pub use clusterer::HybridClusterer;
pub use deduplicator::Deduplicator;
pub use matcher::CatalogMatcher;
pub use normalizer::{MentionNormalizer, NormalizationOutcome};
