//! Memoized unique addend generation.
//!
//! [`PossibleAddends`] answers "all ways to write `sum` as `count` distinct
//! positive integers in increasing order" and keeps every answer it
//! materializes. Its own recursion goes through the same memo, so each
//! `(count, sum)` sub-problem is computed once per generator.
//!
//! # Example
//!
//! ```rust
//! use addends_core::cached::PossibleAddends;
//!
//! let addends = PossibleAddends::new();
//! let result = addends.unique_addends_for(9, 3).unwrap();
//!
//! assert_eq!(result.len(), 3);
//! assert_eq!(&*result[0], &[1, 2, 6]);
//! assert_eq!(&*result[1], &[1, 3, 5]);
//! assert_eq!(&*result[2], &[2, 3, 4]);
//! ```

use rayon::prelude::*;
use std::iter::FusedIterator;

use crate::error::{check_count, Result};
use crate::lifecycle::Dispose;
use crate::memory::memo::{Memo, MemoKey, MemoStats, Partition, SharedPartitions};
use crate::recurrence::{inner_sum_range, is_trivially_empty, pair_range};

/// Memoizing generator of unique addend partitions.
///
/// The generator is `Sync`: concurrent lookups share the memo, and unrelated
/// keys never wait on each other.
#[derive(Debug, Default)]
pub struct PossibleAddends {
    memo: Memo,
    disposed: bool,
}

impl PossibleAddends {
    /// Creates a generator with an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized partitions of `sum` into `count` parts.
    ///
    /// Repeated calls with the same key return the same shared sequence
    /// (`Arc::ptr_eq` holds) without recomputing it.
    pub fn unique_addends_for(&self, sum: u32, count: usize) -> Result<SharedPartitions> {
        self.assert_alive()?;
        check_count(count)?;
        Ok(self.memoized(sum, count))
    }

    /// Lazily computes the partitions of `sum` into `count` parts without
    /// storing the result.
    ///
    /// Sub-problems are still resolved through the memo. The returned
    /// iterator is `Clone`, so the sequence can be restarted.
    pub fn compute_unique_addends(&self, sum: u32, count: usize) -> Result<UniqueAddends<'_>> {
        self.assert_alive()?;
        check_count(count)?;
        Ok(UniqueAddends::new(self, sum, count))
    }

    /// Resolves many `(sum, count)` keys in parallel.
    ///
    /// Results are returned in input order.
    pub fn unique_addends_for_all(&self, keys: &[(u32, usize)]) -> Result<Vec<SharedPartitions>> {
        self.assert_alive()?;
        keys.par_iter()
            .map(|&(sum, count)| self.unique_addends_for(sum, count))
            .collect()
    }

    /// Returns memo statistics.
    pub fn memo_stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Resets memo statistics, keeping stored entries.
    pub fn reset_stats(&self) {
        self.memo.reset_stats();
    }

    fn memoized(&self, sum: u32, count: usize) -> SharedPartitions {
        let key = MemoKey::new(count, sum);
        if let Some(hit) = self.memo.get(&key) {
            return hit;
        }

        self.fill_sub_problems(sum, count);
        self.materialize(sum, count)
    }

    fn materialize(&self, sum: u32, count: usize) -> SharedPartitions {
        self.memo.get_or_compute(MemoKey::new(count, sum), || {
            UniqueAddends::new(self, sum, count).collect()
        })
    }

    /// Stores every sub-problem `(sum, count)` depends on, fewest parts
    /// first. Materializing `(sum, count)` afterwards only reads stored
    /// entries, keeping stack depth independent of `count`.
    fn fill_sub_problems(&self, sum: u32, count: usize) {
        if is_trivially_empty(sum, count) {
            return;
        }

        // Inner sums needed per level, most parts first. The lower end of the
        // range does not depend on the sum and the upper end grows with it,
        // so the level's largest sum bounds the whole next level.
        let mut levels = Vec::new();
        let mut largest = sum;
        for parts in (3..=count).rev() {
            let Some((first, last)) = inner_sum_range(largest, parts, None) else {
                break;
            };
            levels.push((parts - 1, first, last));
            largest = last;
        }

        for &(parts, first, last) in levels.iter().rev() {
            for inner_sum in first..=last {
                self.materialize(inner_sum, parts);
            }
        }

        tracing::trace!(
            count,
            sum,
            levels = levels.len(),
            "filled unique addend sub-problems"
        );
    }
}

impl Dispose for PossibleAddends {
    const OBJECT_NAME: &'static str = "PossibleAddends";

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let released = self.memo.clear();
        tracing::debug!(entries = released, "released unique addend memo");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for PossibleAddends {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Debug, Clone)]
enum State {
    /// Two parts: `(first, sum - first)` for `first` up to `last`.
    Pairs { first: u32, last: u32 },
    /// More parts: inner partitions of `inner_sum`, extended by
    /// `sum - inner_sum`.
    Extend {
        inner_sum: u32,
        last_inner_sum: u32,
        inner: Option<SharedPartitions>,
        position: usize,
    },
    Exhausted,
}

/// Lazy, uncached sequence of the partitions of `sum` into `count` parts.
///
/// Yields partitions ascending by the addend that varies first: pairs by
/// their first addend, larger tuples by the sum of all but their largest
/// addend, then in the order of those inner partitions.
#[derive(Debug, Clone)]
pub struct UniqueAddends<'a> {
    source: &'a PossibleAddends,
    sum: u32,
    count: usize,
    state: State,
}

impl<'a> UniqueAddends<'a> {
    fn new(source: &'a PossibleAddends, sum: u32, count: usize) -> Self {
        let state = if is_trivially_empty(sum, count) {
            None
        } else if count == 2 {
            pair_range(sum, None).map(|(first, last)| State::Pairs { first, last })
        } else {
            inner_sum_range(sum, count, None).map(|(first, last)| State::Extend {
                inner_sum: first,
                last_inner_sum: last,
                inner: None,
                position: 0,
            })
        };

        Self {
            source,
            sum,
            count,
            state: state.unwrap_or(State::Exhausted),
        }
    }

    /// Target sum.
    pub fn target_sum(&self) -> u32 {
        self.sum
    }

    /// Number of addends per partition.
    pub fn parts(&self) -> usize {
        self.count
    }
}

impl Iterator for UniqueAddends<'_> {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        loop {
            match &mut self.state {
                State::Exhausted => return None,
                State::Pairs { first, last } => {
                    if *first > *last {
                        self.state = State::Exhausted;
                        return None;
                    }
                    let smaller = *first;
                    *first += 1;
                    return Some(vec![smaller, self.sum - smaller].into_boxed_slice());
                }
                State::Extend {
                    inner_sum,
                    last_inner_sum,
                    inner,
                    position,
                } => {
                    let source = self.source;
                    let inner_count = self.count - 1;
                    let largest = self.sum - *inner_sum;
                    let partitions =
                        inner.get_or_insert_with(|| source.memoized(*inner_sum, inner_count));

                    while let Some(candidate) = partitions.get(*position) {
                        *position += 1;
                        if candidate[inner_count - 1] >= largest {
                            continue;
                        }
                        let mut partition = Vec::with_capacity(self.count);
                        partition.extend_from_slice(candidate);
                        partition.push(largest);
                        return Some(partition.into_boxed_slice());
                    }

                    if *inner_sum >= *last_inner_sum {
                        self.state = State::Exhausted;
                        return None;
                    }
                    *inner_sum += 1;
                    *inner = None;
                    *position = 0;
                }
            }
        }
    }
}

impl FusedIterator for UniqueAddends<'_> {}
