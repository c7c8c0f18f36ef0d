//! Lock-free counters tracking miner activity.
//!
//! Counters are shared through an `Arc`, so a clone handed out by
//! [`TemplateMiner::metrics`](crate::TemplateMiner::metrics) keeps observing
//! the live miner. All updates use relaxed ordering; readers see eventually
//! consistent values, which is sufficient for monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MetricsInner {
    lines_trained: AtomicU64,
    clusters_created: AtomicU64,
    clusters_evicted: AtomicU64,
    lookup_hits: AtomicU64,
    lookup_misses: AtomicU64,
}

/// Shared handle to the miner's activity counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

impl Metrics {
    pub(crate) fn record_trained(&self) {
        self.inner.lines_trained.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_created(&self) {
        self.inner.clusters_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evicted(&self) {
        self.inner.clusters_evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup_hit(&self) {
        self.inner.lookup_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup_miss(&self) {
        self.inner.lookup_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Lines folded into a cluster by training, new clusters included.
    pub fn lines_trained(&self) -> u64 {
        self.inner.lines_trained.load(Ordering::Relaxed)
    }

    /// Clusters created so far.
    pub fn clusters_created(&self) -> u64 {
        self.inner.clusters_created.load(Ordering::Relaxed)
    }

    /// Clusters dropped by the capacity bound.
    pub fn clusters_evicted(&self) -> u64 {
        self.inner.clusters_evicted.load(Ordering::Relaxed)
    }

    /// Read-only lookups that resolved to a cluster.
    pub fn lookup_hits(&self) -> u64 {
        self.inner.lookup_hits.load(Ordering::Relaxed)
    }

    /// Read-only lookups that found no cluster.
    pub fn lookup_misses(&self) -> u64 {
        self.inner.lookup_misses.load(Ordering::Relaxed)
    }

    /// Capture a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_trained: self.lines_trained(),
            clusters_created: self.clusters_created(),
            clusters_evicted: self.clusters_evicted(),
            lookup_hits: self.lookup_hits(),
            lookup_misses: self.lookup_misses(),
        }
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.inner.lines_trained.store(0, Ordering::Relaxed);
        self.inner.clusters_created.store(0, Ordering::Relaxed);
        self.inner.clusters_evicted.store(0, Ordering::Relaxed);
        self.inner.lookup_hits.store(0, Ordering::Relaxed);
        self.inner.lookup_misses.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time counter values with derived rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines_trained: u64,
    pub clusters_created: u64,
    pub clusters_evicted: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
}

impl MetricsSnapshot {
    /// Fraction of trained lines absorbed by an existing cluster.
    pub fn merge_rate(&self) -> f64 {
        if self.lines_trained == 0 {
            return 0.0;
        }
        (self.lines_trained - self.clusters_created) as f64 / self.lines_trained as f64
    }

    /// Fraction of read-only lookups that resolved to a cluster.
    pub fn lookup_hit_rate(&self) -> f64 {
        let total = self.lookup_hits + self.lookup_misses;
        if total == 0 {
            return 0.0;
        }
        self.lookup_hits as f64 / total as f64
    }
}
