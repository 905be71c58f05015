//! The two thread bodies of a trial.

use std::hint::black_box;

use rand::Rng;

use crate::keygen::random_string;
use crate::maps::ConcurrentMap;

/// Inserts `iterations` fresh random keys of length `key_len`, the i-th one with
/// value `i`.
///
/// Keys are not checked for uniqueness; a repeated key overwrites. Returns the number
/// of puts issued.
pub fn put_workload<M, R>(map: &M, rng: &mut R, iterations: usize, key_len: usize) -> usize
where
    M: ConcurrentMap,
    R: Rng + ?Sized,
{
    for i in 0..iterations {
        let key = random_string(rng, key_len);
        map.put(key, i as u64);
    }
    iterations
}

/// Traverses the whole map `scans` times without recording anything.
///
/// Returns the total number of entries visited over all traversals.
pub fn get_workload<M>(map: &M, scans: usize) -> usize
where
    M: ConcurrentMap,
{
    let mut visited = 0;
    for _ in 0..scans {
        map.for_each(&mut |key, value| {
            black_box((key, value));
            visited += 1;
        });
    }
    visited
}
