//! Cluster records: a mined template plus its occurrence statistics.

use std::fmt;

use crate::domain::template;
use crate::domain::volume::Volume;

/// Maximum number of original sample lines retained per cluster.
///
/// Samples are first-come and never replaced.
pub const MAX_SAMPLES: usize = 10;

/// Identifier of a log cluster, unique for the lifetime of one miner.
///
/// Identifiers are assigned monotonically starting at 1 and never reused,
/// even after the cluster itself has been evicted from the cache. A stale
/// identifier left behind in a prefix tree leaf simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw numeric value of this identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mined log template together with its occurrence statistics.
///
/// The template token sequence has a fixed length, set when the cluster is
/// created; merging subsequent lines only ever generalizes literal positions
/// toward the wildcard marker.
#[derive(Debug, Clone)]
pub struct LogCluster {
    id: ClusterId,
    size: u64,
    tokens: Vec<String>,
    samples: Vec<String>,
    volume: Volume,
}

impl LogCluster {
    pub(crate) fn new(id: ClusterId, tokens: Vec<String>, content: &str, timestamp: i64) -> Self {
        let mut volume = Volume::default();
        volume.record(timestamp);
        Self {
            id,
            size: 1,
            tokens,
            samples: vec![content.to_owned()],
            volume,
        }
    }

    /// Fold a matched line into this cluster: generalize the template,
    /// bump the occurrence count, and record the line's sample and volume.
    pub(crate) fn absorb(&mut self, tokens: &[String], wildcard: &str, content: &str, timestamp: i64) {
        self.tokens = template::merge(&self.tokens, tokens, wildcard);
        self.size += 1;
        self.volume.record(timestamp);
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(content.to_owned());
        }
    }

    /// This cluster's identifier.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Number of lines this cluster has absorbed, including the first.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The template token sequence, wildcard markers included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Human-readable template: tokens joined with single spaces.
    pub fn template(&self) -> String {
        self.tokens.join(" ")
    }

    /// Original sample lines, up to [`MAX_SAMPLES`], in arrival order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Time-bucketed volume of lines absorbed by this cluster.
    pub fn volume(&self) -> &Volume {
        &self.volume
    }
}

impl fmt::Display for LogCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template())
    }
}
