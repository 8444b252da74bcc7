//! Concurrent access to the memoized generator.

use addends_core::{cached::PossibleAddends, lifecycle::Dispose};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_same_key_shares_one_result() {
    let addends = Arc::new(PossibleAddends::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let addends = Arc::clone(&addends);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                addends.unique_addends_for(60, 6).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Whatever raced, every caller ends up with the stored winner
    let stored = addends.unique_addends_for(60, 6).unwrap();
    for result in &results {
        assert!(Arc::ptr_eq(result, &stored));
    }
    assert!(!stored.is_empty());
}

#[test]
fn test_unrelated_keys_in_parallel() {
    let addends = Arc::new(PossibleAddends::new());
    let keys: Vec<(u32, usize)> = (20..40).map(|sum| (sum, 4)).collect();

    let handles: Vec<_> = keys
        .iter()
        .map(|&(sum, count)| {
            let addends = Arc::clone(&addends);
            thread::spawn(move || addends.unique_addends_for(sum, count).unwrap().len())
        })
        .collect();
    let threaded: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let sequential = PossibleAddends::new();
    let expected: Vec<usize> = keys
        .iter()
        .map(|&(sum, count)| sequential.unique_addends_for(sum, count).unwrap().len())
        .collect();

    assert_eq!(threaded, expected);
}

#[test]
fn test_parallel_prefetch_matches_lookups() {
    let addends = PossibleAddends::new();
    let keys: Vec<(u32, usize)> = (0..30).map(|i| (10 + i, 2 + (i as usize % 4))).collect();

    let prefetched = addends.unique_addends_for_all(&keys).unwrap();
    assert_eq!(prefetched.len(), keys.len());

    let computations = addends.memo_stats().computations;
    for (&(sum, count), result) in keys.iter().zip(&prefetched) {
        let again = addends.unique_addends_for(sum, count).unwrap();
        assert!(Arc::ptr_eq(result, &again));
    }
    assert_eq!(addends.memo_stats().computations, computations);
}

#[test]
fn test_dispose_after_threads_finish() {
    let mut addends = Arc::new(PossibleAddends::new());

    thread::scope(|scope| {
        for sum in 10..14 {
            let addends = &addends;
            scope.spawn(move || addends.unique_addends_for(sum, 3).unwrap());
        }
    });
    assert!(addends.memo_stats().entries > 0);

    // Exclusive access is required to tear the memo down
    let exclusive = Arc::get_mut(&mut addends).unwrap();
    exclusive.dispose();

    assert_eq!(addends.memo_stats().entries, 0);
    assert!(addends.unique_addends_for(10, 3).unwrap_err().is_disposed());
}

#[test]
fn test_new_generator_recomputes_after_dispose() {
    let mut first = PossibleAddends::new();
    let held = first.unique_addends_for(12, 3).unwrap();
    first.dispose();

    let second = PossibleAddends::new();
    let fresh = second.unique_addends_for(12, 3).unwrap();

    assert!(!Arc::ptr_eq(&held, &fresh));
    assert_eq!(held.to_vec(), fresh.to_vec());
    assert_eq!(second.memo_stats().misses, 1 + 5);
}
