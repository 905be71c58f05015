#![deny(missing_docs)]
//! A scalability harness for concurrent hash maps.
//!
//! One putter thread inserts random keys while a growing number of getter threads
//! scan the same map. For each reader count the harness averages the wall time of
//! several trials and reports the series per map implementation.

#[macro_use]
extern crate log;

pub use config::Config;
pub use error::{MapBenchError, Result};
pub use keygen::KeyPool;
pub use maps::{ConcurrentMap, LockFreeMap, ShardedMap};
pub use report::{SweepPoint, SweepReport};
pub use runner::{Harness, TrialOutcome, PUTTERS_PER_TRIAL};

pub mod config;
mod error;
pub mod keygen;
pub mod maps;
mod report;
mod runner;
pub mod workload;
