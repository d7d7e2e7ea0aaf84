/// Pipeline-level resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("a resolution run is already in progress")]
    AlreadyRunning,

    #[error("merge failed: {reason}")]
    MergeFailed { reason: String },

    #[error("unknown canonical id: {id}")]
    UnknownTechnology { id: String },
}
