use super::{ArtifactError, ConfigError, EmbeddingError, NamingError, ResolutionError};

/// Root error type for the resolver.
#[derive(Debug, thiserror::Error)]
pub enum TechcatError {
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("naming error: {0}")]
    NamingError(#[from] NamingError),

    #[error("artifact error: {0}")]
    ArtifactError(#[from] ArtifactError),

    #[error("resolution error: {0}")]
    ResolutionError(#[from] ResolutionError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TechcatError {
    /// Configuration-time errors stop the pipeline before it starts.
    /// Everything else is absorbed per item inside a stage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::ResolutionError(ResolutionError::AlreadyRunning))
    }
}

pub type TechcatResult<T> = Result<T, TechcatError>;
