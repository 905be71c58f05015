//! Benchmark configuration: the five-integer file and the harness constants.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{MapBenchError, Result};

/// Length of every key inserted by the putter.
pub const DEFAULT_KEY_LEN: usize = 50;
/// Number of strings in the key pool.
pub const DEFAULT_KEY_POOL_SIZE: usize = 5;
/// Shortest key pool string.
pub const DEFAULT_KEY_POOL_MIN_LEN: usize = 8;
/// Number of full traversals each getter performs per trial.
pub const DEFAULT_SCANS_PER_GETTER: usize = 1000;
/// Smallest reader count in the sweep.
pub const DEFAULT_MIN_READERS: usize = 1;
/// Largest reader count in the sweep.
pub const DEFAULT_MAX_READERS: usize = 15;
/// Load factor handed to every map constructor.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

const FIELDS: [&str; 5] = ["putters", "getters", "trials", "puts", "mean"];

/// Everything a benchmark run needs to know.
///
/// The first five fields come from the configuration file, in file order. The rest
/// default to the values the harness has always used and can be overridden from the
/// command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Putter count from the file. One putter runs per trial regardless.
    pub putters: usize,
    /// Getter count from the file. The sweep variable replaces it.
    pub getters: usize,
    /// Trials per reader count.
    pub trials: usize,
    /// Puts issued by the putter in each trial.
    pub puts_per_trial: usize,
    /// Mean of the exponential distribution from the file. Not used by the workload.
    pub mean: u64,
    /// Smallest reader count in the sweep, inclusive.
    pub min_readers: usize,
    /// Largest reader count in the sweep, inclusive.
    pub max_readers: usize,
    /// Full traversals per getter thread.
    pub scans_per_getter: usize,
    /// Length of keys inserted by the putter.
    pub key_len: usize,
    /// Load factor passed to `ConcurrentMap::with_capacity`.
    pub load_factor: f64,
    /// Number of strings in the key pool.
    pub key_pool_size: usize,
    /// Shortest key pool string.
    pub key_pool_min_len: usize,
    /// Longest key pool string.
    pub key_pool_max_len: usize,
    /// Base seed for every random generator. Taken from the clock when absent.
    pub seed: Option<u64>,
    /// Directory receiving the report files.
    pub output_dir: PathBuf,
    /// Also write a JSON report next to the plot file.
    pub write_json: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            putters: 1,
            getters: 1,
            trials: 1,
            puts_per_trial: 0,
            mean: 0,
            min_readers: DEFAULT_MIN_READERS,
            max_readers: DEFAULT_MAX_READERS,
            scans_per_getter: DEFAULT_SCANS_PER_GETTER,
            key_len: DEFAULT_KEY_LEN,
            load_factor: DEFAULT_LOAD_FACTOR,
            key_pool_size: DEFAULT_KEY_POOL_SIZE,
            key_pool_min_len: DEFAULT_KEY_POOL_MIN_LEN,
            key_pool_max_len: DEFAULT_KEY_LEN,
            seed: None,
            output_dir: PathBuf::from("."),
            write_json: false,
        }
    }
}

impl Config {
    /// Parses the five whitespace separated integers of a configuration file:
    /// putters, getters, trials, puts per trial and mean. Anything after the fifth
    /// value is ignored.
    pub fn parse(input: &str) -> Result<Config> {
        let mut tokens = input.split_whitespace();
        let mut values = [0u64; 5];
        for (value, field) in values.iter_mut().zip(FIELDS.iter()) {
            let token = tokens.next().ok_or(MapBenchError::MissingField(*field))?;
            *value = token.parse()?;
        }
        let [putters, getters, trials, puts_per_trial, mean] = values;
        Ok(Config {
            putters: putters as usize,
            getters: getters as usize,
            trials: trials as usize,
            puts_per_trial: puts_per_trial as usize,
            mean,
            ..Config::default()
        })
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            MapBenchError::StringError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Config::parse(&contents)
    }

    /// Reader counts in sweep order.
    pub fn reader_counts(&self) -> std::ops::RangeInclusive<usize> {
        self.min_readers..=self.max_readers
    }

    /// Number of points a sweep produces.
    pub fn sweep_len(&self) -> usize {
        self.reader_counts().count()
    }
}
