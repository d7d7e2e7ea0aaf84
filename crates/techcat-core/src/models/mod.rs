mod canonical_result;
mod catalog;
mod cluster;
mod matching;
mod mention;
mod merge;
mod report;

pub use canonical_result::{
    CanonicalResult, NamingFailure, NamingOutcome, NamingRequest, NamingResponse, VariantSummary,
};
pub use catalog::{
    CanonicalTechnology, Catalog, CatalogEntry, Provenance, RetiredIdentity, Variant,
    VariantMethod,
};
pub use cluster::{Cluster, PairSimilarity};
pub use matching::{CatalogMatch, MatchConfidence, MatchMethod, MatchOutcome};
pub use mention::{DocType, Mention, RawMention, SourceMetadata};
pub use merge::{
    ConfidenceTier, DedupOutcome, DomainGate, GateResults, MergeDecision, MergeOutcome,
    MergeStage, ReviewRecord,
};
pub use report::{FinalCatalog, OrphanedVariant, StageSummary, ValidationReport};
