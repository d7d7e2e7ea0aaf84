//! Canonicalizer — names every cluster through the naming capability.
//!
//! Calls run concurrently under a semaphore, each with its own timeout.
//! Results are buffered and returned in cluster order, so the next stage
//! never observes completion order.

use std::sync::Arc;
use std::time::Duration;

use techcat_core::config::NamingConfig;
use techcat_core::constants::UNKNOWN_DOMAIN;
use techcat_core::errors::{NamingError, TechcatError};
use techcat_core::models::{
    CanonicalResult, Cluster, NamingFailure, NamingOutcome, NamingRequest, NamingResponse,
    VariantSummary,
};
use techcat_core::text::title_case;
use techcat_core::traits::ICanonicalNamer;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::tracker::NamingTracker;

pub struct Canonicalizer {
    namer: Arc<dyn ICanonicalNamer>,
    config: NamingConfig,
    tracker: NamingTracker,
}

impl Canonicalizer {
    pub fn new(namer: Arc<dyn ICanonicalNamer>, config: NamingConfig) -> Self {
        Self {
            namer,
            config,
            tracker: NamingTracker::new(),
        }
    }

    pub fn tracker(&self) -> &NamingTracker {
        &self.tracker
    }

    pub fn build_request(&self, cluster: &Cluster) -> NamingRequest {
        NamingRequest {
            cluster_id: cluster.id.clone(),
            variants: cluster
                .members
                .iter()
                .map(|m| VariantSummary {
                    name: m.original_name.clone(),
                    occurrence_count: m.occurrence_count,
                    roles: m.roles.iter().cloned().collect(),
                    doc_types: m.doc_types.iter().copied().collect(),
                })
                .collect(),
            avg_similarity: cluster.avg_similarity,
            domain_taxonomy: self.config.domain_taxonomy.clone(),
            industry: self.config.industry.clone(),
        }
    }

    /// Turn a raw response into a usable result, or reject it.
    ///
    /// Domains outside the taxonomy become `Unknown`; confidence is clamped
    /// to [0, 1] with a missing or NaN value treated as 0.
    pub fn validate_response(
        &self,
        cluster: &Cluster,
        response: NamingResponse,
    ) -> Result<CanonicalResult, NamingError> {
        let name = response.canonical_name.trim();
        if name.is_empty() {
            return Err(NamingError::EmptyName {
                cluster_id: cluster.id.clone(),
            });
        }

        let domain = response
            .domain
            .as_deref()
            .map(str::trim)
            .and_then(|d| {
                self.config
                    .domain_taxonomy
                    .iter()
                    .find(|t| t.eq_ignore_ascii_case(d))
                    .cloned()
            })
            .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string());

        let confidence = match response.confidence {
            Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
            _ => 0.0,
        };

        Ok(CanonicalResult {
            cluster_id: cluster.id.clone(),
            input_variants: cluster.member_names(),
            canonical_name: title_case(name),
            domain,
            description: response.description.trim().to_string(),
            confidence,
            rationale: response.rationale.trim().to_string(),
        })
    }

    /// Name every cluster. A failed or timed-out call skips that cluster and
    /// is recorded in `failures`; it never aborts the batch.
    pub async fn canonicalize_all(&self, clusters: &[Cluster]) -> NamingOutcome {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let mut tasks = JoinSet::new();

        for (index, cluster) in clusters.iter().enumerate() {
            let request = self.build_request(cluster);
            let namer = Arc::clone(&self.namer);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        let reason = "naming semaphore closed".to_string();
                        return (index, Err(NamingError::RequestFailed { reason }.into()));
                    }
                };
                let result = match tokio::time::timeout(timeout, namer.name_cluster(&request)).await
                {
                    Ok(inner) => inner,
                    Err(_) => Err(TechcatError::from(NamingError::Timeout {
                        cluster_id: request.cluster_id.clone(),
                        timeout_secs: timeout.as_secs(),
                    })),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<NamingResponse, TechcatError>>> =
            (0..clusters.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => warn!(error = %e, "naming task failed to join"),
            }
        }

        let mut outcome = NamingOutcome::default();
        for (cluster, slot) in clusters.iter().zip(slots) {
            let result = match slot {
                Some(Ok(response)) => self
                    .validate_response(cluster, response)
                    .map_err(TechcatError::from),
                Some(Err(e)) => Err(e),
                None => Err(TechcatError::from(NamingError::RequestFailed {
                    reason: "naming task aborted".to_string(),
                })),
            };
            match result {
                Ok(named) => {
                    self.tracker.record_named();
                    outcome.results.push(named);
                }
                Err(e) => {
                    if matches!(e, TechcatError::NamingError(NamingError::Timeout { .. })) {
                        self.tracker.record_timeout();
                    } else {
                        self.tracker.record_failed();
                    }
                    warn!(cluster = %cluster.id, error = %e, "naming failed, skipping cluster");
                    outcome.failures.push(NamingFailure {
                        cluster_id: cluster.id.clone(),
                        variants: cluster.member_names(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            provider = self.namer.name(),
            clusters = clusters.len(),
            named = outcome.results.len(),
            failed = outcome.failures.len(),
            "canonicalization complete"
        );
        outcome
    }
}
