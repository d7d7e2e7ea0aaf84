//! Named vs failed counters for one canonicalization batch.

use std::sync::atomic::{AtomicUsize, Ordering};

pub struct NamingTracker {
    named: AtomicUsize,
    failed: AtomicUsize,
    timed_out: AtomicUsize,
}

impl NamingTracker {
    pub fn new() -> Self {
        Self {
            named: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            timed_out: AtomicUsize::new(0),
        }
    }

    pub fn record_named(&self) {
        self.named.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Timeouts also count as failures.
    pub fn record_timeout(&self) {
        self.timed_out.fetch_add(1, Ordering::Relaxed);
        self.record_failed();
    }

    /// Fraction of clusters that received a valid name.
    pub fn success_rate(&self) -> f64 {
        let n = self.named.load(Ordering::Relaxed) as f64;
        let f = self.failed.load(Ordering::Relaxed) as f64;
        let total = n + f;
        if total < f64::EPSILON {
            0.0
        } else {
            n / total
        }
    }

    pub fn named_count(&self) -> usize {
        self.named.load(Ordering::Relaxed)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn timeout_count(&self) -> usize {
        self.timed_out.load(Ordering::Relaxed)
    }
}

impl Default for NamingTracker {
    fn default() -> Self {
        Self::new()
    }
}
