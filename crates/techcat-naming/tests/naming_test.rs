//! Canonicalizer behavior under failing, slow and misbehaving namers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use techcat_core::config::NamingConfig;
use techcat_core::errors::{NamingError, TechcatResult};
use techcat_core::models::{Cluster, Mention, NamingRequest, NamingResponse};
use techcat_core::traits::ICanonicalNamer;
use techcat_naming::{create_namer, Canonicalizer, HeuristicNamer};

fn cluster(id: &str, names: &[&str]) -> Cluster {
    Cluster {
        id: id.to_string(),
        members: names.iter().map(|n| Mention::bare(*n, 1)).collect(),
        similarities: vec![],
        avg_similarity: 1.0,
    }
}

/// Echoes the first variant, sleeping longer for earlier clusters so
/// completion order is the reverse of submission order.
struct ReverseLatencyNamer {
    total: u64,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl ICanonicalNamer for ReverseLatencyNamer {
    async fn name_cluster(&self, request: &NamingRequest) -> TechcatResult<NamingResponse> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let index: u64 = request.cluster_id.trim_start_matches("c").parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis((self.total - index) * 10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(NamingResponse {
            canonical_name: request.variants[0].name.clone(),
            domain: Some("Software".to_string()),
            description: String::new(),
            confidence: Some(0.8),
            rationale: String::new(),
        })
    }

    fn name(&self) -> &str {
        "reverse-latency"
    }
}

/// Fails for clusters whose first variant contains "bad", hangs for "slow".
struct SelectiveNamer;

#[async_trait]
impl ICanonicalNamer for SelectiveNamer {
    async fn name_cluster(&self, request: &NamingRequest) -> TechcatResult<NamingResponse> {
        let first = &request.variants[0].name;
        if first.contains("bad") {
            return Err(NamingError::RequestFailed {
                reason: "upstream 500".to_string(),
            }
            .into());
        }
        if first.contains("slow") {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if first.contains("blank") {
            return Ok(NamingResponse::default());
        }
        Ok(NamingResponse {
            canonical_name: first.clone(),
            domain: Some("not a domain".to_string()),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "selective"
    }
}

#[tokio::test]
async fn results_follow_cluster_order_not_completion_order() {
    let namer = Arc::new(ReverseLatencyNamer {
        total: 6,
        in_flight: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
    });
    let config = NamingConfig {
        max_concurrent: 3,
        ..Default::default()
    };
    let canonicalizer = Canonicalizer::new(namer.clone(), config);
    let clusters: Vec<Cluster> = (0..6)
        .map(|i| cluster(&format!("c{i}"), &[&format!("tech {i}")]))
        .collect();

    let outcome = canonicalizer.canonicalize_all(&clusters).await;

    let ids: Vec<&str> = outcome.results.iter().map(|r| r.cluster_id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1", "c2", "c3", "c4", "c5"]);
    assert!(outcome.failures.is_empty());
    assert!(namer.peak.load(Ordering::SeqCst) <= 3);
    assert_eq!(canonicalizer.tracker().named_count(), 6);
}

#[tokio::test]
async fn failures_are_skipped_and_recorded() {
    let config = NamingConfig {
        timeout_secs: 1,
        ..Default::default()
    };
    let canonicalizer = Canonicalizer::new(Arc::new(SelectiveNamer), config);
    let clusters = vec![
        cluster("c1", &["good one"]),
        cluster("c2", &["bad one", "bad two"]),
        cluster("c3", &["slow one"]),
        cluster("c4", &["blank one"]),
        cluster("c5", &["good two"]),
    ];

    let outcome = canonicalizer.canonicalize_all(&clusters).await;

    let named: Vec<&str> = outcome.results.iter().map(|r| r.cluster_id.as_str()).collect();
    assert_eq!(named, vec!["c1", "c5"]);
    let failed: Vec<&str> = outcome.failures.iter().map(|f| f.cluster_id.as_str()).collect();
    assert_eq!(failed, vec!["c2", "c3", "c4"]);
    assert_eq!(outcome.failures[0].variants, vec!["bad one", "bad two"]);
    assert!(outcome.failures[1].reason.contains("timed out"));

    let tracker = canonicalizer.tracker();
    assert_eq!(tracker.named_count(), 2);
    assert_eq!(tracker.failed_count(), 3);
    assert_eq!(tracker.timeout_count(), 1);
}

#[tokio::test]
async fn invalid_domain_falls_back_to_unknown() {
    let canonicalizer = Canonicalizer::new(Arc::new(SelectiveNamer), NamingConfig::default());
    let outcome = canonicalizer
        .canonicalize_all(&[cluster("c1", &["vertiport network"])])
        .await;
    assert_eq!(outcome.results[0].domain, "Unknown");
    assert_eq!(outcome.results[0].canonical_name, "Vertiport Network");
}

#[tokio::test]
async fn heuristic_namer_end_to_end() {
    let canonicalizer = Canonicalizer::new(Arc::new(HeuristicNamer), NamingConfig::default());
    let mut c = cluster("cluster_0001", &["tilt-rotor propulsion", "tiltrotor system"]);
    c.members[1].occurrence_count = 5;
    c.avg_similarity = 0.9;

    let outcome = canonicalizer.canonicalize_all(&[c]).await;
    let result = &outcome.results[0];
    assert_eq!(result.canonical_name, "Tiltrotor System");
    assert_eq!(result.domain, "Propulsion");
    assert!((result.confidence - 0.95).abs() < 1e-9);
    assert_eq!(result.input_variants.len(), 2);
}

#[test]
fn create_namer_selects_provider() {
    let heuristic = create_namer(&NamingConfig::default()).unwrap();
    assert_eq!(heuristic.name(), "heuristic");

    let unknown = NamingConfig {
        provider: "oracle".to_string(),
        ..Default::default()
    };
    assert!(create_namer(&unknown).is_err());

    let api = NamingConfig {
        provider: "api".to_string(),
        api_key_env: "TECHCAT_TEST_NAMING_KEY_THAT_IS_NEVER_SET".to_string(),
        ..Default::default()
    };
    assert!(create_namer(&api).is_err());
}
