//! # techcat-resolution
//!
//! Six-stage technology resolution pipeline: normalize → match → cluster →
//! canonicalize → deduplicate → canonical dedup, then build and validate.
//! Every stage writes a checkpoint artifact so a run can resume mid-pipeline.

pub mod algorithms;
pub mod engine;
pub mod input;
pub mod pipeline;
pub mod stages;

pub use engine::ResolutionPipeline;
pub use input::{load_catalog, load_mentions, load_resolved_catalog};
pub use pipeline::{ArtifactStore, RunReport, RunState, RunSummary, Stage};
pub use stages::{
    CanonicalNameClusterer, CatalogBuilder, CatalogMatcher, Deduplicator, HybridClusterer,
    MentionNormalizer, NormalizationOutcome,
};
