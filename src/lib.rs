//! # template-miner
//!
//! Online log template mining: incrementally cluster a stream of free-text
//! log lines into a bounded set of *templates*: token sequences in which
//! variable positions are replaced by a wildcard marker (`<*>` by default).
//!
//! This is the foundational technique behind log clustering in observability
//! pipelines: unbounded free text becomes a compact, queryable set of patterns
//! with per-pattern frequency and timing statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use template_miner::TemplateMiner;
//!
//! let mut miner = TemplateMiner::new();
//! miner.train("connection from 10.0.0.1 failed", 1000);
//! miner.train("connection from 10.0.0.2 failed", 1010);
//!
//! let clusters = miner.clusters();
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].template(), "connection from <*> failed");
//! assert_eq!(clusters[0].size(), 2);
//! ```
//!
//! Or customize the engine for your corpus:
//!
//! ```rust
//! use template_miner::TemplateMiner;
//!
//! let miner = TemplateMiner::builder()
//!     .with_cluster_depth(5)
//!     .with_similarity_threshold(0.5)
//!     .with_max_clusters(10_000)
//!     .with_extra_delimiters(vec!["=".to_string()])
//!     .build()
//!     .unwrap();
//! # let _ = miner;
//! ```
//!
//! ## How It Works
//!
//! Each incoming line is tokenized (whitespace plus any configured extra
//! delimiters) and routed through a fixed-depth prefix tree:
//!
//! - The first tree level partitions clusters by exact token count, so two
//!   lines with different token counts can never share a cluster.
//! - Subsequent levels are keyed by the line's leading tokens, up to
//!   `cluster_depth - 2` levels deep. Tokens containing digits always route
//!   through a shared wildcard child, which keeps numeric payloads (ports,
//!   IDs, counters) from exploding the tree.
//! - The leaf reached this way holds a short list of candidate clusters; the
//!   line is scored position-wise against each candidate and merged into the
//!   best one at or above the similarity threshold, or a new cluster is
//!   created when none qualifies.
//!
//! Merging only ever *generalizes*: a template position that disagrees with a
//! new line becomes the wildcard marker and never reverts to a literal.
//!
//! ## Training vs. Matching
//!
//! [`TemplateMiner::train`] is the only mutating entry point. For read-only
//! classification against already-mined templates, use
//! [`TemplateMiner::find_match`]: it requires an exact fit (wildcard positions
//! accept any token) and never creates or modifies a cluster.
//!
//! ```rust
//! use template_miner::TemplateMiner;
//!
//! let mut miner = TemplateMiner::new();
//! miner.train("user alice logged in", 0);
//! miner.train("user bob logged in", 0);
//!
//! // "user <*> logged in" now accepts any user.
//! assert!(miner.find_match("user carol logged in").is_some());
//! assert!(miner.find_match("database restarted unexpectedly").is_none());
//! ```
//!
//! ## Memory Management
//!
//! The set of live clusters is held in an LRU cache bounded by
//! `max_clusters` (0 = unbounded, the default). When the cache overflows, the
//! least recently matched cluster is evicted; its identifier may linger in
//! tree leaves but is skipped during scoring and dropped lazily on the next
//! insertion at that leaf. Cluster identifiers are never reused.
//!
//! Each cluster additionally keeps up to 10 original sample lines and a
//! sparse, 10-second-bucketed [`Volume`] tracker:
//!
//! ```rust
//! use template_miner::TemplateMiner;
//!
//! let mut miner = TemplateMiner::new();
//! miner.train("disk full", 5);
//! miner.train("disk full", 12);
//! miner.train("disk full", 25);
//!
//! let clusters = miner.clusters();
//! assert_eq!(clusters[0].volume().total(), 3);
//! // Half-open query over bucket timestamps: buckets 0 and 10 fall in [0, 20).
//! assert_eq!(clusters[0].volume().range(0, 20).len(), 2);
//! ```
//!
//! ## Observability
//!
//! The engine keeps atomic counters for trained lines, created clusters,
//! evictions, and lookup hits/misses:
//!
//! ```rust
//! use template_miner::TemplateMiner;
//!
//! let mut miner = TemplateMiner::new();
//! miner.train("connection from 10.0.0.1 failed", 0);
//! miner.train("connection from 10.0.0.2 failed", 0);
//!
//! let snapshot = miner.metrics().snapshot();
//! assert_eq!(snapshot.lines_trained, 2);
//! assert_eq!(snapshot.clusters_created, 1);
//! ```
//!
//! Internal events (cluster creation, merges, evictions) are emitted through
//! the `tracing` crate at `debug`/`trace` level; no subscriber is installed by
//! this library.
//!
//! ## Concurrency
//!
//! The engine is single-threaded and synchronous. `train` takes `&mut self`;
//! wrap the whole miner in one mutual-exclusion scope if shared across
//! threads, since tree insertion and cache eviction are not independently
//! safe to interleave.

// Domain layer - pure clustering logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - adapters over external crates
mod infrastructure;

pub use application::{
    config::BuildError,
    engine::{TemplateMiner, TemplateMinerBuilder},
    metrics::{Metrics, MetricsSnapshot},
};

pub use domain::{
    cluster::{ClusterId, LogCluster, MAX_SAMPLES},
    volume::{Bucket, Volume, BUCKET_SECONDS},
};
