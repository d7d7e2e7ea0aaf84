//! EmbeddingEngine — the main entry point for techcat-embeddings.
//!
//! Fronts a provider with the exact-text cache. Stages call `prefetch`
//! once with every text they will compare (the only suspension point),
//! then score synchronously through `cached`.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use techcat_core::config::EmbeddingConfig;
use techcat_core::errors::{EmbeddingError, TechcatResult};
use techcat_core::traits::IEmbeddingProvider;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, ExactTextCache};

/// Outcome of one prefetch call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Distinct texts requested.
    pub requested: usize,
    /// Already cached before the call.
    pub cached: usize,
    /// Newly embedded.
    pub embedded: usize,
    /// Texts in batches that errored or timed out.
    pub failed: usize,
}

pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: ExactTextCache,
    batch_size: usize,
    max_concurrent: usize,
    timeout: Duration,
}

impl EmbeddingEngine {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            batch_size = config.batch_size,
            max_concurrent = config.max_concurrent,
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache: ExactTextCache::new(config.cache_size),
            batch_size: config.batch_size.max(1),
            max_concurrent: config.max_concurrent.max(1),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Embed every not-yet-cached text, in batches, under the concurrency
    /// budget. Failed batches are logged and counted, never raised.
    pub async fn prefetch(&self, texts: &[String]) -> PrefetchReport {
        let distinct: BTreeSet<&String> = texts.iter().collect();
        let mut report = PrefetchReport {
            requested: distinct.len(),
            ..Default::default()
        };

        let missing: Vec<String> = distinct
            .into_iter()
            .filter(|t| !self.cache.contains(t.as_str()))
            .cloned()
            .collect();
        report.cached = report.requested - missing.len();
        if missing.is_empty() {
            return report;
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for batch in missing.chunks(self.batch_size) {
            let batch = batch.to_vec();
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.timeout;

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        let reason = "embedding semaphore closed".to_string();
                        return (batch, Err(EmbeddingError::InferenceFailed { reason }.into()));
                    }
                };
                let texts = batch.clone();
                let call = tokio::task::spawn_blocking(move || provider.embed_batch(&texts));
                let result: TechcatResult<Vec<Vec<f32>>> =
                    match tokio::time::timeout(timeout, call).await {
                        Ok(Ok(inner)) => inner,
                        Ok(Err(join_err)) => Err(EmbeddingError::InferenceFailed {
                            reason: format!("embedding task panicked: {join_err}"),
                        }
                        .into()),
                        Err(_) => Err(EmbeddingError::Timeout {
                            timeout_secs: timeout.as_secs(),
                        }
                        .into()),
                    };
                (batch, result)
            });
        }

        // Completion order is irrelevant: results land in the cache by text.
        while let Some(joined) = tasks.join_next().await {
            let (batch, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "embedding batch task failed to join");
                    continue;
                }
            };
            match result {
                Ok(vectors) if vectors.len() == batch.len() => {
                    for (text, vector) in batch.iter().zip(vectors) {
                        self.cache.insert(text, vector);
                    }
                    report.embedded += batch.len();
                }
                Ok(vectors) => {
                    warn!(
                        sent = batch.len(),
                        received = vectors.len(),
                        "embedding batch size mismatch, skipping batch"
                    );
                    report.failed += batch.len();
                }
                Err(e) => {
                    warn!(texts = batch.len(), error = %e, "embedding batch failed, skipping");
                    report.failed += batch.len();
                }
            }
        }

        info!(
            requested = report.requested,
            cached = report.cached,
            embedded = report.embedded,
            failed = report.failed,
            "embedding prefetch complete"
        );
        report
    }

    /// Cached embedding for the exact text, if any.
    pub fn cached(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(text)
    }

    /// Synchronous get-or-embed. Only for blocking contexts.
    pub fn embed_blocking(&self, text: &str) -> TechcatResult<Arc<Vec<f32>>> {
        if let Some(hit) = self.cache.get(text) {
            debug!(text, "cache hit for embedding");
            return Ok(hit);
        }
        let vector = self.provider.embed(text)?;
        Ok(self.cache.insert(text, vector))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashedEmbeddingProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn hashed_engine(batch_size: usize) -> EmbeddingEngine {
        let config = EmbeddingConfig {
            batch_size,
            dimensions: 64,
            ..Default::default()
        };
        EmbeddingEngine::new(Arc::new(HashedEmbeddingProvider::new(64)), &config)
    }

    /// Counts texts sent to the provider.
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl IEmbeddingProvider for CountingProvider {
        fn embed(&self, _text: &str) -> TechcatResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0; 4])
        }
        fn embed_batch(&self, texts: &[String]) -> TechcatResult<Vec<Vec<f32>>> {
            self.calls.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![1.0; 4]).collect())
        }
        fn dimensions(&self) -> usize {
            4
        }
        fn name(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn prefetch_fills_cache() {
        let engine = hashed_engine(2);
        let texts: Vec<String> = ["a b", "c d", "e f"].iter().map(|s| s.to_string()).collect();
        let report = engine.prefetch(&texts).await;
        assert_eq!(report.requested, 3);
        assert_eq!(report.embedded, 3);
        assert_eq!(report.failed, 0);
        for t in &texts {
            assert!(engine.cached(t).is_some());
        }
    }

    #[tokio::test]
    async fn prefetch_skips_cached_and_duplicate_texts() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let engine = EmbeddingEngine::new(provider.clone(), &EmbeddingConfig::default());
        let texts = vec!["x".to_string(), "x".to_string(), "y".to_string()];
        engine.prefetch(&texts).await;
        let second = engine.prefetch(&texts).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.cached, 2);
        assert_eq!(second.embedded, 0);
    }

    #[test]
    fn embed_blocking_caches() {
        let engine = hashed_engine(8);
        let a = engine.embed_blocking("lidar").unwrap();
        let b = engine.embed_blocking("lidar").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache_stats().hits, 1);
    }
}
