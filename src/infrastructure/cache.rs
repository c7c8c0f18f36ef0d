//! LRU-bounded cluster storage.
//!
//! The cache is the single owner of cluster records; the prefix tree only
//! refers to them by identifier. Recency is deliberately coarse: only
//! [`ClusterCache::get_mut`], used when a trained line matches, promotes an
//! entry. Candidate scoring and read-only lookups go through
//! [`ClusterCache::peek`] and leave the eviction order untouched.

use std::fmt;
use std::num::NonZeroUsize;

use ahash::RandomState;
use lru::LruCache;

use crate::domain::cluster::{ClusterId, LogCluster};

pub(crate) struct ClusterCache {
    inner: LruCache<ClusterId, LogCluster, RandomState>,
}

impl ClusterCache {
    /// Build a cache holding at most `max` clusters; zero means unbounded.
    pub(crate) fn new(max: usize) -> Self {
        let inner = match NonZeroUsize::new(max) {
            Some(capacity) => LruCache::with_hasher(capacity, RandomState::new()),
            None => LruCache::unbounded_with_hasher(RandomState::new()),
        };
        Self { inner }
    }

    /// Insert a cluster, returning the least recently used entry if the
    /// capacity bound forced one out.
    pub(crate) fn insert(
        &mut self,
        id: ClusterId,
        cluster: LogCluster,
    ) -> Option<(ClusterId, LogCluster)> {
        // push returns the displaced entry; filter out the same-key case,
        // which is a replacement rather than an eviction.
        self.inner.push(id, cluster).filter(|(evicted, _)| *evicted != id)
    }

    /// Fetch a cluster for mutation, marking it most recently used.
    pub(crate) fn get_mut(&mut self, id: ClusterId) -> Option<&mut LogCluster> {
        self.inner.get_mut(&id)
    }

    /// Fetch a cluster without affecting its recency.
    pub(crate) fn peek(&self, id: ClusterId) -> Option<&LogCluster> {
        self.inner.peek(&id)
    }

    /// Whether the cluster is still resident, without affecting recency.
    pub(crate) fn contains(&self, id: ClusterId) -> bool {
        self.inner.contains(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    /// All resident clusters, most recently used first.
    pub(crate) fn values(&self) -> impl Iterator<Item = &LogCluster> {
        self.inner.iter().map(|(_, cluster)| cluster)
    }

    /// Visit resident clusters, most recently used first, stopping early
    /// when the visitor returns false.
    pub(crate) fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&LogCluster) -> bool,
    {
        for (_, cluster) in self.inner.iter() {
            if !visit(cluster) {
                break;
            }
        }
    }
}

impl fmt::Debug for ClusterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterCache")
            .field("len", &self.inner.len())
            .field("cap", &self.inner.cap())
            .finish()
    }
}
