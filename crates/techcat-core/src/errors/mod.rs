mod artifact_error;
mod config_error;
mod embedding_error;
mod naming_error;
mod resolution_error;
mod techcat_error;

pub use artifact_error::ArtifactError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use naming_error::NamingError;
pub use resolution_error::ResolutionError;
pub use techcat_error::{TechcatError, TechcatResult};
