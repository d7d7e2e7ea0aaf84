//! # techcat-core
//!
//! Foundation crate for the technology catalog resolver.
//! Defines the data model, capability traits, errors, config, and the
//! text helpers (normalization, slugs, tokenization) every stage shares.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TechcatConfig;
pub use errors::{TechcatError, TechcatResult};
pub use models::{
    CanonicalResult, CanonicalTechnology, CatalogEntry, CatalogMatch, Cluster, Mention,
    MergeDecision, Provenance, RawMention, ReviewRecord, ValidationReport, Variant,
};
