//! Random keys.
//!
//! Generators are never shared between threads. Every thread that needs randomness
//! builds its own `StdRng` from the run's base seed and a stream number, so a run
//! started with the same seed produces the same keys.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns a string of `len` characters drawn uniformly from `[0-9A-Za-z]`.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Picks a base seed from the system clock.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Builds the generator for one stream of a run.
///
/// Distinct streams of the same base seed give independent sequences.
pub fn stream_rng(seed: u64, stream: u64) -> StdRng {
    // splitmix64 step so that neighbouring streams do not share seed bits
    let mut z = seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}

/// A small fixed set of random strings generated once at startup.
///
/// The put workload does not draw from the pool; it is kept for lookups.
#[derive(Debug, Clone)]
pub struct KeyPool {
    keys: Vec<String>,
}

impl KeyPool {
    /// Generates `size` strings whose lengths are uniform in `[min_len, max_len]`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        min_len: usize,
        max_len: usize,
    ) -> KeyPool {
        let keys = (0..size)
            .map(|_| {
                let len = rng.gen_range(min_len..=max_len.max(min_len));
                random_string(&mut *rng, len)
            })
            .collect();
        KeyPool { keys }
    }

    /// Returns a uniformly chosen key, or `None` if the pool is empty.
    ///
    /// The put and get workloads do not draw from the pool; it is here for
    /// workloads that look keys up.
    pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.keys.len());
        Some(&self.keys[idx])
    }

    /// All keys in generation order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the pool holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
