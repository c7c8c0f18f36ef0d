//! The mining engine: ties the prefix tree, the cluster cache, and the
//! similarity scoring together behind a small train/match surface.

use tracing::{debug, trace};

use crate::application::config::{BuildError, MinerConfig};
use crate::application::metrics::Metrics;
use crate::domain::cluster::{ClusterId, LogCluster};
use crate::domain::template;
use crate::domain::tokens::tokenize;
use crate::domain::tree::PrefixTree;
use crate::infrastructure::cache::ClusterCache;

/// Configures and builds a [`TemplateMiner`].
///
/// ```rust
/// use template_miner::TemplateMiner;
///
/// let miner = TemplateMiner::builder()
///     .with_similarity_threshold(0.5)
///     .with_max_clusters(10_000)
///     .build()
///     .unwrap();
/// # let _ = miner;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateMinerBuilder {
    config: MinerConfig,
}

impl TemplateMinerBuilder {
    /// Total tree depth including the token-count layer and the leaf layer.
    /// Defaults to 4, meaning two leading tokens key the tree. Minimum 3.
    pub fn with_cluster_depth(mut self, depth: usize) -> Self {
        self.config.cluster_depth = depth;
        self
    }

    /// Minimum similarity for a line to join an existing cluster, in
    /// `[0.0, 1.0]`. Defaults to 0.4.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Child budget per interior tree node, wildcard child included.
    /// Defaults to 100. Must be nonzero.
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.config.max_children = max_children;
        self
    }

    /// Additional substrings replaced by a space before tokenizing.
    pub fn with_extra_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Upper bound on resident clusters; least recently trained clusters are
    /// evicted beyond it. Zero, the default, means unbounded.
    pub fn with_max_clusters(mut self, max_clusters: usize) -> Self {
        self.config.max_clusters = max_clusters;
        self
    }

    /// Marker standing in for variable positions in templates.
    /// Defaults to `<*>`. Must not be empty.
    pub fn with_wildcard_token(mut self, wildcard: impl Into<String>) -> Self {
        self.config.wildcard = wildcard.into();
        self
    }

    /// Validate the configuration and build the miner.
    pub fn build(self) -> Result<TemplateMiner, BuildError> {
        self.config.validate()?;
        Ok(TemplateMiner::from_config(self.config))
    }
}

/// Online log template miner.
///
/// Feed raw lines through [`train`](Self::train) and the miner incrementally
/// groups them into clusters, each carrying a wildcard template, occurrence
/// statistics, and a time-bucketed volume. [`find_match`](Self::find_match)
/// resolves a line against the learned clusters without changing anything.
#[derive(Debug)]
pub struct TemplateMiner {
    config: MinerConfig,
    tree: PrefixTree,
    cache: ClusterCache,
    next_cluster_id: u64,
    metrics: Metrics,
}

impl Default for TemplateMiner {
    fn default() -> Self {
        Self::from_config(MinerConfig::default())
    }
}

impl TemplateMiner {
    /// A miner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start configuring a miner.
    pub fn builder() -> TemplateMinerBuilder {
        TemplateMinerBuilder::default()
    }

    fn from_config(config: MinerConfig) -> Self {
        let tree = PrefixTree::new(
            config.max_node_depth(),
            config.max_children,
            config.wildcard.clone(),
        );
        let cache = ClusterCache::new(config.max_clusters);
        Self {
            config,
            tree,
            cache,
            next_cluster_id: 0,
            metrics: Metrics::default(),
        }
    }

    /// Learn from one log line, returning the cluster it landed in.
    ///
    /// A line matching an existing cluster above the similarity threshold is
    /// folded into it, generalizing differing template positions to the
    /// wildcard and marking the cluster most recently used. Otherwise a new
    /// cluster is created, possibly evicting the least recently used one if
    /// a capacity bound is set.
    ///
    /// `timestamp` is in Unix seconds and feeds the cluster's volume tracker.
    pub fn train(&mut self, content: &str, timestamp: i64) -> &LogCluster {
        self.metrics.record_trained();
        let tokens = tokenize(content, &self.config.extra_delimiters);

        let id = match self.tree_search(&tokens, self.config.similarity_threshold, false) {
            Some(id) => {
                let cluster = self
                    .cache
                    .get_mut(id)
                    .expect("matched cluster is resident");
                cluster.absorb(&tokens, &self.config.wildcard, content, timestamp);
                trace!(cluster_id = %id, template = %cluster.template(), "merged line into cluster");
                id
            }
            None => {
                self.next_cluster_id += 1;
                let id = ClusterId::new(self.next_cluster_id);
                let cluster = LogCluster::new(id, tokens.clone(), content, timestamp);
                debug!(cluster_id = %id, template = %cluster.template(), "created cluster");

                if let Some((evicted_id, evicted)) = self.cache.insert(id, cluster) {
                    self.metrics.record_evicted();
                    debug!(
                        cluster_id = %evicted_id,
                        template = %evicted.template(),
                        size = evicted.size(),
                        "evicted least recently used cluster"
                    );
                }
                let cache = &self.cache;
                self.tree.insert(&tokens, id, |candidate| cache.contains(candidate));
                self.metrics.record_created();
                id
            }
        };

        self.cache.peek(id).expect("trained cluster is resident")
    }

    /// Resolve a line against the learned clusters without mutating anything.
    ///
    /// Matching is strict: every literal template position must equal the
    /// line's token, with wildcard positions accepting any token. Returns
    /// `None` for lines no cluster explains.
    pub fn find_match(&self, content: &str) -> Option<&LogCluster> {
        let tokens = tokenize(content, &self.config.extra_delimiters);
        match self.tree_search(&tokens, 1.0, true) {
            Some(id) => {
                self.metrics.record_lookup_hit();
                self.cache.peek(id)
            }
            None => {
                self.metrics.record_lookup_miss();
                None
            }
        }
    }

    fn tree_search(
        &self,
        tokens: &[String],
        threshold: f64,
        include_wildcards: bool,
    ) -> Option<ClusterId> {
        let candidates = self.tree.leaf_candidates(tokens)?;
        if tokens.is_empty() {
            return candidates
                .iter()
                .copied()
                .find(|id| self.cache.contains(*id));
        }
        self.fast_match(candidates, tokens, threshold, include_wildcards)
    }

    /// Pick the best-scoring live candidate, ties broken toward the cluster
    /// with more wildcard positions.
    fn fast_match(
        &self,
        candidates: &[ClusterId],
        tokens: &[String],
        threshold: f64,
        include_wildcards: bool,
    ) -> Option<ClusterId> {
        let mut best = None;
        let mut max_similarity = -1.0;
        let mut max_wildcards = -1_isize;

        for &id in candidates {
            // Skip identifiers whose clusters have been evicted.
            let Some(cluster) = self.cache.peek(id) else {
                continue;
            };
            let (score, wildcards) = template::similarity(
                cluster.tokens(),
                tokens,
                &self.config.wildcard,
                include_wildcards,
            );
            let wildcards = wildcards as isize;
            if score > max_similarity || (score == max_similarity && wildcards > max_wildcards) {
                max_similarity = score;
                max_wildcards = wildcards;
                best = Some(id);
            }
        }

        if max_similarity >= threshold {
            best
        } else {
            None
        }
    }

    /// Look up a resident cluster by identifier, without affecting recency.
    pub fn get_cluster(&self, id: ClusterId) -> Option<&LogCluster> {
        self.cache.peek(id)
    }

    /// All resident clusters, most recently used first.
    pub fn clusters(&self) -> Vec<&LogCluster> {
        self.cache.values().collect()
    }

    /// Visit resident clusters, most recently used first, stopping early
    /// when the visitor returns false.
    pub fn each_cluster<F>(&self, visit: F)
    where
        F: FnMut(&LogCluster) -> bool,
    {
        self.cache.each(visit);
    }

    /// Number of resident clusters.
    pub fn cluster_count(&self) -> usize {
        self.cache.len()
    }

    /// Handle to the miner's activity counters.
    pub fn metrics(&self) -> Metrics {
        self.metrics.clone()
    }
}
