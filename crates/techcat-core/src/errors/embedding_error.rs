/// Embedding capability errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("batch size mismatch: sent {sent} texts, received {received} vectors")]
    BatchSizeMismatch { sent: usize, received: usize },
}
