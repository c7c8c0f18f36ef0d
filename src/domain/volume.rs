//! Sparse, time-bucketed per-cluster volume tracking.
//!
//! Timestamps are integer Unix seconds, truncated to [`BUCKET_SECONDS`]
//! resolution. Buckets are kept strictly increasing and unique; intervals
//! with no events hold no bucket at all, so quiet periods cost nothing.

/// Width of one volume bucket in seconds.
pub const BUCKET_SECONDS: i64 = 10;

/// A single time bucket: a truncated timestamp and its event count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Bucket start, truncated to [`BUCKET_SECONDS`] resolution.
    pub timestamp: i64,
    /// Number of events recorded in this bucket.
    pub count: u64,
}

/// Sparse, time-ascending sequence of event-count buckets.
///
/// ```rust
/// use template_miner::Volume;
///
/// let mut volume = Volume::default();
/// volume.record(5);
/// volume.record(12);
/// volume.record(25);
///
/// assert_eq!(volume.total(), 3);
/// assert_eq!(volume.range(0, 20).len(), 2); // buckets 0 and 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Volume {
    values: Vec<Bucket>,
}

fn truncate(timestamp: i64) -> i64 {
    timestamp.div_euclid(BUCKET_SECONDS) * BUCKET_SECONDS
}

impl Volume {
    /// Record one event at the given timestamp.
    ///
    /// Appending or incrementing the newest bucket is O(1), the common case
    /// for monotonically arriving timestamps. A timestamp before the first
    /// bucket prepends in O(1) amortized; anything else binary-searches for
    /// its bucket and inserts or increments in place.
    pub fn record(&mut self, timestamp: i64) {
        let bucket = truncate(timestamp);

        let (first, last) = match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => {
                self.values.push(Bucket {
                    timestamp: bucket,
                    count: 1,
                });
                return;
            }
        };

        if last == bucket {
            // Most common case: another event in the current bucket.
            if let Some(newest) = self.values.last_mut() {
                newest.count += 1;
            }
        } else if last < bucket {
            self.values.push(Bucket {
                timestamp: bucket,
                count: 1,
            });
        } else if first > bucket {
            self.values.insert(
                0,
                Bucket {
                    timestamp: bucket,
                    count: 1,
                },
            );
        } else {
            match self.values.binary_search_by_key(&bucket, |b| b.timestamp) {
                Ok(index) => self.values[index].count += 1,
                Err(index) => self.values.insert(
                    index,
                    Bucket {
                        timestamp: bucket,
                        count: 1,
                    },
                ),
            }
        }
    }

    /// Return the contiguous run of buckets with timestamps in `[start, end)`.
    ///
    /// Empty if the tracker has no buckets, the range is empty or inverted,
    /// or the tracker's span lies entirely outside the query.
    pub fn range(&self, start: i64, end: i64) -> &[Bucket] {
        let (Some(first), Some(last)) = (self.values.first(), self.values.last()) else {
            return &[];
        };
        if start >= end || first.timestamp >= end || last.timestamp < start {
            return &[];
        }

        let lo = if start > first.timestamp {
            self.values.partition_point(|b| b.timestamp < start)
        } else {
            0
        };
        let hi = if end > last.timestamp {
            self.values.len()
        } else {
            self.values.partition_point(|b| b.timestamp < end)
        };

        &self.values[lo..hi]
    }

    /// Total number of events across all buckets.
    pub fn total(&self) -> u64 {
        self.values.iter().map(|b| b.count).sum()
    }

    /// All buckets in ascending timestamp order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.values
    }

    /// Whether no events have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
