//! # techcat-naming
//!
//! Canonicalizer: turns each mention cluster into one proposed canonical
//! name, domain, description and confidence. The naming capability is
//! non-deterministic and rate limited, so calls run under a bounded pool
//! with a per-call timeout, and every response is validated before use.

pub mod canonicalizer;
pub mod prompt;
pub mod providers;
pub mod tracker;

pub use canonicalizer::Canonicalizer;
pub use providers::{create_namer, ApiNamer, HeuristicNamer};
pub use tracker::NamingTracker;
