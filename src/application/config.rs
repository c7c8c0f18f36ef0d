//! Miner configuration and its validation errors.

use std::error::Error;
use std::fmt;

/// Smallest meaningful cluster depth.
///
/// Depth counts the token-count layer and the leaf layer plus at least one
/// token-keyed layer in between.
pub(crate) const MIN_CLUSTER_DEPTH: usize = 3;

/// Validated settings shared by the tree, the cache, and the match loop.
#[derive(Debug, Clone)]
pub(crate) struct MinerConfig {
    pub(crate) cluster_depth: usize,
    pub(crate) similarity_threshold: f64,
    pub(crate) max_children: usize,
    pub(crate) extra_delimiters: Vec<String>,
    pub(crate) max_clusters: usize,
    pub(crate) wildcard: String,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            cluster_depth: 4,
            similarity_threshold: 0.4,
            max_children: 100,
            extra_delimiters: Vec::new(),
            max_clusters: 0,
            wildcard: "<*>".to_string(),
        }
    }
}

impl MinerConfig {
    /// Number of token-keyed tree layers, excluding the token-count layer
    /// and the leaf.
    pub(crate) fn max_node_depth(&self) -> usize {
        self.cluster_depth - 2
    }

    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        if self.cluster_depth < MIN_CLUSTER_DEPTH {
            return Err(BuildError::DepthTooSmall(self.cluster_depth));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(BuildError::ThresholdOutOfRange(self.similarity_threshold));
        }
        if self.max_children == 0 {
            return Err(BuildError::ZeroMaxChildren);
        }
        if self.wildcard.is_empty() {
            return Err(BuildError::EmptyWildcard);
        }
        Ok(())
    }
}

/// Rejected miner configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Cluster depth below the minimum of 3.
    DepthTooSmall(usize),
    /// Similarity threshold outside `[0.0, 1.0]`.
    ThresholdOutOfRange(f64),
    /// Child budget of zero would make every tree level a dead end.
    ZeroMaxChildren,
    /// Empty wildcard token cannot mark generalized positions.
    EmptyWildcard,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DepthTooSmall(depth) => write!(
                f,
                "cluster depth {depth} is below the minimum of {MIN_CLUSTER_DEPTH}"
            ),
            BuildError::ThresholdOutOfRange(threshold) => write!(
                f,
                "similarity threshold {threshold} is outside the range [0.0, 1.0]"
            ),
            BuildError::ZeroMaxChildren => write!(f, "max children per tree node must be nonzero"),
            BuildError::EmptyWildcard => write!(f, "wildcard token must not be empty"),
        }
    }
}

impl Error for BuildError {}
