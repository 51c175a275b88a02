//! Observability metrics for attribution.
//!
//! Counters are shared across clones and never influence a classification result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking classification and recording statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Referrers run through the rule table
    referrers_classified: AtomicU64,
    /// Referrers that produced a code
    referrers_attributed: AtomicU64,
    /// Referrers no rule matched
    referrers_unattributed: AtomicU64,
    /// Codes written to a store
    codes_recorded: AtomicU64,
    /// Failed store reads or writes
    store_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                referrers_classified: AtomicU64::new(0),
                referrers_attributed: AtomicU64::new(0),
                referrers_unattributed: AtomicU64::new(0),
                codes_recorded: AtomicU64::new(0),
                store_failures: AtomicU64::new(0),
            }),
        }
    }

    /// Record a classification and whether it produced a code.
    pub(crate) fn record_classification(&self, attributed: bool) {
        self.inner
            .referrers_classified
            .fetch_add(1, Ordering::Relaxed);
        if attributed {
            self.inner
                .referrers_attributed
                .fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner
                .referrers_unattributed
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a code written to a store.
    pub(crate) fn record_code_recorded(&self) {
        self.inner.codes_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store failure.
    pub(crate) fn record_store_failure(&self) {
        self.inner.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of referrers classified.
    pub fn referrers_classified(&self) -> u64 {
        self.inner.referrers_classified.load(Ordering::Relaxed)
    }

    /// Get the number of referrers that produced a code.
    pub fn referrers_attributed(&self) -> u64 {
        self.inner.referrers_attributed.load(Ordering::Relaxed)
    }

    /// Get the number of referrers no rule matched.
    pub fn referrers_unattributed(&self) -> u64 {
        self.inner.referrers_unattributed.load(Ordering::Relaxed)
    }

    /// Get the number of codes written to a store.
    pub fn codes_recorded(&self) -> u64 {
        self.inner.codes_recorded.load(Ordering::Relaxed)
    }

    /// Get the number of store failures.
    pub fn store_failures(&self) -> u64 {
        self.inner.store_failures.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            referrers_classified: self.referrers_classified(),
            referrers_attributed: self.referrers_attributed(),
            referrers_unattributed: self.referrers_unattributed(),
            codes_recorded: self.codes_recorded(),
            store_failures: self.store_failures(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.referrers_classified.store(0, Ordering::Relaxed);
        self.inner.referrers_attributed.store(0, Ordering::Relaxed);
        self.inner.referrers_unattributed.store(0, Ordering::Relaxed);
        self.inner.codes_recorded.store(0, Ordering::Relaxed);
        self.inner.store_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Referrers run through the rule table
    pub referrers_classified: u64,
    /// Referrers that produced a code
    pub referrers_attributed: u64,
    /// Referrers no rule matched
    pub referrers_unattributed: u64,
    /// Codes written to a store
    pub codes_recorded: u64,
    /// Failed store reads or writes
    pub store_failures: u64,
}

impl MetricsSnapshot {
    /// Fraction of classified referrers that produced a code (0.0 to 1.0).
    ///
    /// Returns 0.0 if nothing has been classified.
    pub fn attribution_rate(&self) -> f64 {
        if self.referrers_classified == 0 {
            0.0
        } else {
            self.referrers_attributed as f64 / self.referrers_classified as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot {
            referrers_classified: 0,
            referrers_attributed: 0,
            referrers_unattributed: 0,
            codes_recorded: 0,
            store_failures: 0,
        });
    }

    #[test]
    fn test_record_classification() {
        let metrics = Metrics::new();
        metrics.record_classification(true);
        metrics.record_classification(false);
        metrics.record_classification(true);

        assert_eq!(metrics.referrers_classified(), 3);
        assert_eq!(metrics.referrers_attributed(), 2);
        assert_eq!(metrics.referrers_unattributed(), 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let clone = metrics.clone();
        clone.record_code_recorded();
        clone.record_store_failure();

        assert_eq!(metrics.codes_recorded(), 1);
        assert_eq!(metrics.store_failures(), 1);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_classification(true);
        metrics.record_code_recorded();
        metrics.reset();

        assert_eq!(metrics.snapshot().referrers_classified, 0);
        assert_eq!(metrics.snapshot().codes_recorded, 0);
    }

    #[test]
    fn test_attribution_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot().attribution_rate(), 0.0);

        metrics.record_classification(true);
        metrics.record_classification(false);
        metrics.record_classification(false);
        metrics.record_classification(true);

        let rate = metrics.snapshot().attribution_rate();
        assert!((rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        metrics.record_classification(false);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.referrers_classified(), 1000);
        assert_eq!(metrics.referrers_unattributed(), 1000);
    }
}
