//! Shared bounds of the unique addend recurrence.
//!
//! A partition of `sum` into `count > 2` strictly increasing parts is built
//! by choosing an inner sum `i`, taking every partition of `i` into
//! `count - 1` parts, and appending `sum - i` as the new largest addend
//! whenever it exceeds the inner partition's largest one. Inner sums are
//! visited in ascending order, so the appended addend descends.
//!
//! Both generators visit the same inner sums. The helpers here narrow that
//! range to the values that can contribute at least one partition; skipping
//! the others leaves the emitted sequence unchanged.

/// Smallest inner sum ever considered by the recurrence.
const FIRST_INNER_SUM: u32 = 3;

/// `n(n + 1) / 2`: the smallest sum of `n` distinct positive integers.
#[inline]
pub(crate) fn triangular(n: u64) -> u64 {
    n * (n + 1) / 2
}

/// Whether `(sum, count)` has no partitions at all.
#[inline]
pub(crate) fn is_trivially_empty(sum: u32, count: usize) -> bool {
    count < 2 || sum < 3 || (sum as u64) < triangular(count as u64)
}

/// Inclusive range of first addends for a pair summing to `sum`.
///
/// With `bound`, the second addend must also stay below it.
/// Returns `None` when no pair qualifies.
pub(crate) fn pair_range(sum: u32, bound: Option<u32>) -> Option<(u32, u32)> {
    let mut first = 1;
    if let Some(bound) = bound {
        // sum - j < bound
        if sum >= bound {
            first = first.max(sum - bound + 1);
        }
    }
    // j < sum - j
    let last = sum.saturating_sub(1) / 2;
    (first <= last).then_some((first, last))
}

/// Inclusive range of inner sums for `count > 2` parts summing to `sum`.
///
/// Every inner sum in the range yields at least one partition once the
/// appended addend `sum - i` is required to exceed the inner partition's
/// largest addend. With `bound`, the appended addend must also stay below
/// it. Returns `None` when the range is empty.
pub(crate) fn inner_sum_range(sum: u32, count: usize, bound: Option<u32>) -> Option<(u32, u32)> {
    debug_assert!(count > 2);
    let inner = count as u64 - 1;
    let inner_min = triangular(inner);

    let mut first = inner_min.max(FIRST_INNER_SUM as u64);
    if let Some(bound) = bound {
        // sum - i < bound
        if sum >= bound {
            first = first.max((sum - bound) as u64 + 1);
        }
    }

    // The inner parts all lie below `sum - i`, so at most
    // (count - 1) * (sum - i) - T(count - 1) of the sum fits into them.
    let reachable = (inner * sum as u64).checked_sub(inner_min)?;
    let last = reachable / count as u64;

    (first <= last).then(|| (first as u32, last as u32))
}
