use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::keygen::{clock_seed, stream_rng, KeyPool};
use crate::maps::ConcurrentMap;
use crate::report::{SweepPoint, SweepReport};
use crate::workload::{get_workload, put_workload};
use crate::{MapBenchError, Result};

/// Putter threads launched per trial.
pub const PUTTERS_PER_TRIAL: usize = 1;

const KEY_POOL_STREAM: u64 = 0;

/// What one trial measured.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    /// Getter threads in the trial.
    pub readers: usize,
    /// Wall time from just before the first spawn to after the last join.
    pub elapsed: Duration,
    /// Time the putter spent in its workload.
    pub putter: Duration,
    /// Time each getter spent in its workload, in spawn order.
    pub getters: Vec<Duration>,
    /// Entries in the map once every thread has joined.
    pub entries: usize,
    /// Entries visited by all getters together.
    pub visited: usize,
}

impl TrialOutcome {
    /// The longest time any worker of the trial spent in its workload.
    pub fn slowest_worker(&self) -> Duration {
        self.getters
            .iter()
            .cloned()
            .fold(self.putter, Duration::max)
    }
}

/// Runs trials and sweeps against any `ConcurrentMap`.
///
/// A harness holds the configuration, the key pool and the base seed of a run. It
/// owns no map: every trial builds its own and drops it before returning.
pub struct Harness {
    config: Config,
    seed: u64,
    key_pool: KeyPool,
}

impl Harness {
    /// Creates a harness, picking the base seed and generating the key pool.
    pub fn new(config: Config) -> Harness {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let key_pool = KeyPool::generate(
            &mut stream_rng(seed, KEY_POOL_STREAM),
            config.key_pool_size,
            config.key_pool_min_len,
            config.key_pool_max_len,
        );
        if config.putters != PUTTERS_PER_TRIAL {
            warn!(
                "Configured {} putters; each trial runs {}",
                config.putters, PUTTERS_PER_TRIAL
            );
        }
        debug!(
            "Configured getter count {} is replaced by the sweep over {:?}",
            config.getters,
            config.reader_counts()
        );
        debug!("Key pool: {:?}", key_pool.keys());
        Harness {
            config,
            seed,
            key_pool,
        }
    }

    /// The configuration of this run.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base seed every generator of this run derives from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The key pool generated at startup.
    pub fn key_pool(&self) -> &KeyPool {
        &self.key_pool
    }

    /// Runs one trial: a fresh map, one putter and `readers` getters, all joined.
    ///
    /// `trial` only selects the putter's random stream. If a worker panics or a thread
    /// cannot be spawned, every worker already started is joined before the error is
    /// returned.
    pub fn run_trial<M: ConcurrentMap>(
        &self,
        readers: usize,
        trial: usize,
    ) -> Result<TrialOutcome> {
        let config = &self.config;
        let map = M::with_capacity(config.puts_per_trial, config.load_factor);
        let mut rng = stream_rng(self.seed, trial_stream(readers, trial));

        let start = Instant::now();
        let (putter, getters, spawn_error) = thread::scope(|s| {
            let map = &map;
            let putter = thread::Builder::new()
                .name("putter".to_owned())
                .spawn_scoped(s, move || {
                    let started = Instant::now();
                    put_workload(map, &mut rng, config.puts_per_trial, config.key_len);
                    started.elapsed()
                });

            let mut getters = Vec::with_capacity(readers);
            let mut spawn_error = None;
            if putter.is_ok() {
                for i in 0..readers {
                    let getter = thread::Builder::new()
                        .name(format!("getter-{}", i))
                        .spawn_scoped(s, move || {
                            let started = Instant::now();
                            let visited = get_workload(map, config.scans_per_getter);
                            (started.elapsed(), visited)
                        });
                    match getter {
                        Ok(getter) => getters.push(getter),
                        Err(e) => {
                            spawn_error = Some(e);
                            break;
                        }
                    }
                }
            }

            // join everything before looking at any result
            let putter = putter.map(|h| h.join());
            let getters: Vec<_> = getters.into_iter().map(|h| h.join()).collect();
            (putter, getters, spawn_error)
        });
        let elapsed = start.elapsed();

        let putter = putter?;
        if let Some(e) = spawn_error {
            return Err(e.into());
        }
        let putter =
            putter.map_err(|_| MapBenchError::WorkerPanicked("putter".to_owned()))?;
        let mut getter_times = Vec::with_capacity(readers);
        let mut visited = 0;
        for (i, getter) in getters.into_iter().enumerate() {
            let (time, seen) =
                getter.map_err(|_| MapBenchError::WorkerPanicked(format!("getter-{}", i)))?;
            getter_times.push(time);
            visited += seen;
        }

        Ok(TrialOutcome {
            readers,
            elapsed,
            putter,
            getters: getter_times,
            entries: map.len(),
            visited,
        })
    }

    /// Sweeps the reader count over the configured range, running every trial of a
    /// reader count before moving to the next one.
    ///
    /// `on_point` is called as soon as a reader count's average is known.
    pub fn sweep<M, F>(&self, mut on_point: F) -> Result<SweepReport>
    where
        M: ConcurrentMap,
        F: FnMut(&SweepPoint),
    {
        let config = &self.config;
        if config.min_readers > config.max_readers {
            return Err(MapBenchError::StringError(format!(
                "empty reader range {}..={}",
                config.min_readers, config.max_readers
            )));
        }
        if config.trials == 0 {
            warn!("Zero trials per reader count; averages will not be finite");
        }
        info!(
            "Sweeping {} over {:?} readers, {} trials of {} puts each",
            M::NAME,
            config.reader_counts(),
            config.trials,
            config.puts_per_trial
        );

        let mut report = SweepReport::new(M::NAME, self.seed, PUTTERS_PER_TRIAL);
        for readers in config.reader_counts() {
            let mut total = Duration::new(0, 0);
            for trial in 0..config.trials {
                let outcome = self.run_trial::<M>(readers, trial)?;
                debug!(
                    "{} readers={} trial={} elapsed={:?} entries={}",
                    M::NAME,
                    readers,
                    trial,
                    outcome.elapsed,
                    outcome.entries
                );
                total += outcome.elapsed;
            }
            let point = SweepPoint::from_total(readers, config.trials, total);
            on_point(&point);
            report.points.push(point);
        }
        Ok(report)
    }

    /// Sweeps `M` and writes its report files into the configured output directory.
    pub fn run<M, F>(&self, on_point: F) -> Result<SweepReport>
    where
        M: ConcurrentMap,
        F: FnMut(&SweepPoint),
    {
        let report = self.sweep::<M, F>(on_point)?;
        let dir = &self.config.output_dir;
        let path = report.write_plot(dir)?;
        info!("Wrote {}", path.display());
        if self.config.write_json {
            let path = report.write_json(dir)?;
            info!("Wrote {}", path.display());
        }
        Ok(report)
    }
}

fn trial_stream(readers: usize, trial: usize) -> u64 {
    // stream 0 belongs to the key pool
    1 + (((readers as u64) << 32) | trial as u64)
}
