//! # techcat-embeddings
//!
//! Embedding capability for the resolver: an HTTP API provider, an offline
//! hashed provider, and the `EmbeddingEngine` that fronts them with an
//! exact-text cache and bounded concurrent prefetch.

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::ExactTextCache;
pub use engine::{EmbeddingEngine, PrefetchReport};
pub use providers::{create_provider, ApiEmbeddingProvider, HashedEmbeddingProvider};
