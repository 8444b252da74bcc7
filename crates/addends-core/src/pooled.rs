//! Allocation-free streaming of unique addend partitions.
//!
//! [`BufferedPartitions`] walks the same recurrence as the memoized
//! generator but keeps no results: one buffer of `count` addends is acquired
//! for the whole traversal and rewritten in place between items. Each item is
//! a view borrowed from the enumerator, so it cannot outlive the next call to
//! [`BufferedPartitions::advance`].
//!
//! Use [`partitions_enumerable`] (or the memoized generator) when results
//! must be kept.
//!
//! # Example
//!
//! ```rust
//! use addends_core::pooled::partitions_buffered;
//!
//! let mut partitions = partitions_buffered(7, 2).unwrap();
//! let mut largest = Vec::new();
//! while let Some(view) = partitions.advance() {
//!     largest.push(view[1]);
//! }
//! assert_eq!(largest, vec![6, 5, 4]);
//! ```

use crate::config::{get_config, AddendsConfig};
use crate::error::{check_count, Result};
use crate::memory::pool::{AddendBuffer, BufferPool};
use crate::recurrence::{inner_sum_range, is_trivially_empty, pair_range};

/// Enumerates the partitions of `sum` into `count` parts as borrowed views.
pub fn partitions_buffered(sum: u32, count: usize) -> Result<BufferedPartitions> {
    BufferedPartitions::new(sum, count)
}

/// Enumerates the partitions of `sum` into `count` parts as owned vectors.
pub fn partitions_enumerable(sum: u32, count: usize) -> Result<OwnedPartitions> {
    Ok(BufferedPartitions::new(sum, count)?.into_owned())
}

/// Enumeration progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No item produced yet.
    NotStarted,
    /// The buffer holds the last item produced.
    Enumerating,
    /// No more items; the buffer has been released.
    Exhausted,
}

/// Single-pass enumeration over one reusable buffer.
///
/// Level `k` of the traversal owns slot `k - 1` of the buffer (slots 0 and 1
/// for the pair level). Each level's sum is the target minus the addends
/// placed by the levels above it, so the buffer alone encodes the position.
#[derive(Debug)]
pub struct BufferedPartitions {
    buffer: Option<AddendBuffer>,
    sum: u32,
    count: usize,
    phase: Phase,
    /// Sum of the two smallest addends in place; where the next pull resumes.
    pair_sum: u32,
}

impl BufferedPartitions {
    /// Creates an enumeration using the global configuration and shared pool.
    pub fn new(sum: u32, count: usize) -> Result<Self> {
        Self::with_pool(sum, count, get_config(), BufferPool::shared())
    }

    /// Creates an enumeration renting from `pool` when `config` asks for it.
    pub fn with_pool(
        sum: u32,
        count: usize,
        config: &AddendsConfig,
        pool: &BufferPool,
    ) -> Result<Self> {
        check_count(count)?;

        if is_trivially_empty(sum, count) {
            return Ok(Self {
                buffer: None,
                sum,
                count,
                phase: Phase::Exhausted,
                pair_sum: 0,
            });
        }

        let pool = config.should_pool(count).then_some(pool);
        Ok(Self {
            buffer: Some(AddendBuffer::acquire(count, pool)),
            sum,
            count,
            phase: Phase::NotStarted,
            pair_sum: 0,
        })
    }

    /// Target sum.
    pub fn target_sum(&self) -> u32 {
        self.sum
    }

    /// Number of addends per partition.
    pub fn parts(&self) -> usize {
        self.count
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the buffer was rented from a pool. False once released.
    pub fn is_pooled(&self) -> bool {
        self.buffer.as_ref().is_some_and(AddendBuffer::is_pooled)
    }

    /// Produces the next partition, overwriting the previous one.
    pub fn advance(&mut self) -> Option<&[u32]> {
        let found = match self.phase {
            Phase::NotStarted => self.seek(self.count, self.sum, true),
            Phase::Enumerating => self.seek(2, self.pair_sum, false),
            Phase::Exhausted => return None,
        };

        match found {
            Some(pair_sum) => {
                self.phase = Phase::Enumerating;
                self.pair_sum = pair_sum;
                let count = self.count;
                self.buffer.as_deref().map(|buffer| &buffer[..count])
            }
            None => {
                self.phase = Phase::Exhausted;
                self.buffer = None;
                None
            }
        }
    }

    /// Drives the enumeration to the end, passing each view to `f`.
    pub fn for_each_view<F>(mut self, mut f: F)
    where
        F: FnMut(&[u32]),
    {
        while let Some(view) = self.advance() {
            f(view);
        }
    }

    /// Copies every item out, one owned vector per partition.
    pub fn into_owned(self) -> OwnedPartitions {
        OwnedPartitions { inner: self }
    }

    /// Moves to the next complete partition.
    ///
    /// Starts at `level` with that level's sum, either entering it fresh or
    /// stepping its current addend. Returns the pair level's sum when a
    /// partition is in place, `None` once the top level is exhausted.
    fn seek(&mut self, mut level: usize, mut level_sum: u32, mut entering: bool) -> Option<u32> {
        let count = self.count;
        let buffer: &mut [u32] = self.buffer.as_deref_mut()?;

        loop {
            let bound = (level < count).then(|| buffer[level]);
            let placed = if entering {
                enter_level(buffer, level, level_sum, bound)
            } else {
                step_level(buffer, level, level_sum, bound)
            };

            if placed {
                if level == 2 {
                    return Some(level_sum);
                }
                level_sum -= buffer[level - 1];
                level -= 1;
                entering = true;
            } else {
                if level == count {
                    return None;
                }
                level_sum += buffer[level];
                level += 1;
                entering = false;
            }
        }
    }
}

/// Places the first addend(s) of `level`. False if the level has none.
fn enter_level(buffer: &mut [u32], level: usize, level_sum: u32, bound: Option<u32>) -> bool {
    if level == 2 {
        let Some((first, _)) = pair_range(level_sum, bound) else {
            return false;
        };
        buffer[0] = first;
        buffer[1] = level_sum - first;
    } else {
        let Some((inner_sum, _)) = inner_sum_range(level_sum, level, bound) else {
            return false;
        };
        buffer[level - 1] = level_sum - inner_sum;
    }
    true
}

/// Moves `level` to its next addend(s). False once the level is exhausted.
fn step_level(buffer: &mut [u32], level: usize, level_sum: u32, bound: Option<u32>) -> bool {
    if level == 2 {
        let Some((_, last)) = pair_range(level_sum, bound) else {
            return false;
        };
        let first = buffer[0] + 1;
        if first > last {
            return false;
        }
        buffer[0] = first;
        buffer[1] = level_sum - first;
    } else {
        let Some((_, last)) = inner_sum_range(level_sum, level, bound) else {
            return false;
        };
        let inner_sum = level_sum - buffer[level - 1] + 1;
        if inner_sum > last {
            return false;
        }
        buffer[level - 1] = level_sum - inner_sum;
    }
    true
}

/// Owned copies of a buffered enumeration.
///
/// Each item is an independent vector of exactly `count` addends.
#[derive(Debug)]
pub struct OwnedPartitions {
    inner: BufferedPartitions,
}

impl Iterator for OwnedPartitions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        let count = self.inner.count;
        self.inner.advance().map(|view| view[..count].to_vec())
    }
}

impl std::iter::FusedIterator for OwnedPartitions {}
