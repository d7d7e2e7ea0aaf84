/// Checkpoint artifact errors.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found: {path}")]
    NotFound { path: String },

    #[error("failed to read artifact {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to write artifact {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("cannot resume from stage {stage}: no upstream artifacts")]
    NoUpstream { stage: String },
}
