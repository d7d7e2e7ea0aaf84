use async_trait::async_trait;

use crate::errors::TechcatResult;
use crate::models::{NamingRequest, NamingResponse};

/// Naming capability: proposes one canonical identity for a cluster.
///
/// Implementations are non-deterministic and rate limited. Callers validate
/// the response and bound concurrency and latency.
#[async_trait]
pub trait ICanonicalNamer: Send + Sync {
    async fn name_cluster(&self, request: &NamingRequest) -> TechcatResult<NamingResponse>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
