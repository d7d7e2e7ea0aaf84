/// Naming capability errors. Each one skips a single cluster.
#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    #[error("naming request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("naming call for cluster {cluster_id} timed out after {timeout_secs}s")]
    Timeout { cluster_id: String, timeout_secs: u64 },

    #[error("malformed naming response: {reason}")]
    MalformedResponse { reason: String },

    #[error("naming response for cluster {cluster_id} has an empty canonical name")]
    EmptyName { cluster_id: String },
}
