//! Concurrent memo of materialized partition sets.
//!
//! Entries are keyed by `(count, sum)` and created lazily on first lookup.
//! An entry never changes once stored and is never evicted individually;
//! the whole memo is dropped at once when its owner is disposed.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// An immutable partition: strictly increasing positive addends.
pub type Partition = Box<[u32]>;

/// A materialized, shareable sequence of partitions.
pub type SharedPartitions = Arc<[Partition]>;

/// Identifies the partitions of `sum` into `count` parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoKey {
    /// Number of addends
    pub count: usize,
    /// Target sum
    pub sum: u32,
}

impl MemoKey {
    /// Creates a new key.
    pub fn new(count: usize, sum: u32) -> Self {
        Self { count, sum }
    }
}

/// Memo statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoStats {
    /// Number of stored entries
    pub entries: usize,
    /// Lookups answered from a stored entry
    pub hits: u64,
    /// Lookups that found no entry
    pub misses: u64,
    /// Completed materializations, including ones that lost a race
    pub computations: u64,
}

/// Two-level `count -> sum -> partitions` store flattened onto one
/// concurrent map.
#[derive(Debug, Default)]
pub struct Memo {
    entries: DashMap<MemoKey, SharedPartitions>,
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
}

impl Memo {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a stored entry, counting a hit when one is found.
    pub fn get(&self, key: &MemoKey) -> Option<SharedPartitions> {
        let found = self.lookup(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    fn lookup(&self, key: &MemoKey) -> Option<SharedPartitions> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the entry for `key`, materializing it with `compute` if absent.
    ///
    /// `compute` runs without any lock held, so it may recurse into this memo
    /// for other keys. Two threads missing the same key may both compute it;
    /// the first to store wins and every caller gets the stored value.
    pub fn get_or_compute<F>(&self, key: MemoKey, compute: F) -> SharedPartitions
    where
        F: FnOnce() -> SharedPartitions,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let computed = compute();
        self.computations.fetch_add(1, Ordering::Relaxed);

        let stored = Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::clone(&computed))
                .value(),
        );

        if Arc::ptr_eq(&stored, &computed) {
            tracing::debug!(
                count = key.count,
                sum = key.sum,
                partitions = stored.len(),
                "memoized unique addends"
            );
        } else {
            tracing::trace!(
                count = key.count,
                sum = key.sum,
                "discarded concurrently computed addends"
            );
        }
        stored
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the memo holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry, returning how many were released.
    ///
    /// Sequences still referenced by callers stay alive until those
    /// references are dropped.
    pub fn clear(&self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }

    /// Returns memo statistics.
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
        }
    }

    /// Resets statistics counters.
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.computations.store(0, Ordering::Relaxed);
    }
}
