mod embedding;
mod namer;

pub use embedding::IEmbeddingProvider;
pub use namer::ICanonicalNamer;
