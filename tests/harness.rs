use mapbench::{ConcurrentMap, Config, Harness, LockFreeMap, ShardedMap};
use std::fs;
use tempfile::TempDir;

// Small trials keep the sweeps quick; the shape of the sweep is what matters here.
fn small_config(trials: usize, puts: usize) -> Config {
    Config {
        trials,
        puts_per_trial: puts,
        scans_per_getter: 5,
        seed: Some(2024),
        ..Config::default()
    }
}

fn sweep_has_one_point_per_reader_count<M: ConcurrentMap>() {
    let harness = Harness::new(small_config(2, 200));
    let mut seen = Vec::new();
    let report = harness
        .sweep::<M, _>(|point| seen.push(point.readers))
        .unwrap();

    assert_eq!(report.map, M::NAME);
    assert_eq!(report.points.len(), 15);
    assert_eq!(seen, (1..=15).collect::<Vec<_>>());
    for (point, readers) in report.points.iter().zip(1..=15) {
        assert_eq!(point.readers, readers);
        assert_eq!(point.trials, 2);
        assert!(point.average_secs.is_finite());
        assert!(point.average_secs >= 0.0);
    }
}

#[test]
fn lockfree_sweep_has_one_point_per_reader_count() {
    sweep_has_one_point_per_reader_count::<LockFreeMap>();
}

#[test]
fn sharded_sweep_has_one_point_per_reader_count() {
    sweep_has_one_point_per_reader_count::<ShardedMap>();
}

fn every_trial_starts_from_an_empty_map<M: ConcurrentMap>() {
    let harness = Harness::new(small_config(1, 500));
    for trial in 0..4 {
        let outcome = harness.run_trial::<M>(2, trial).unwrap();
        // 50-character random keys do not collide in practice
        assert_eq!(outcome.entries, 500);
        assert_eq!(outcome.getters.len(), 2);
    }
}

#[test]
fn lockfree_trials_do_not_share_state() {
    every_trial_starts_from_an_empty_map::<LockFreeMap>();
}

#[test]
fn sharded_trials_do_not_share_state() {
    every_trial_starts_from_an_empty_map::<ShardedMap>();
}

fn elapsed_covers_every_worker<M: ConcurrentMap>() {
    let harness = Harness::new(Config {
        scans_per_getter: 50,
        ..small_config(1, 2000)
    });
    for readers in &[1, 4, 8] {
        let outcome = harness.run_trial::<M>(*readers, 0).unwrap();
        assert_eq!(outcome.readers, *readers);
        assert_eq!(outcome.getters.len(), *readers);
        assert!(
            outcome.elapsed >= outcome.slowest_worker(),
            "elapsed {:?} < slowest worker {:?}",
            outcome.elapsed,
            outcome.slowest_worker()
        );
        assert!(outcome.visited <= readers * 50 * 2000);
    }
}

#[test]
fn lockfree_elapsed_covers_every_worker() {
    elapsed_covers_every_worker::<LockFreeMap>();
}

#[test]
fn sharded_elapsed_covers_every_worker() {
    elapsed_covers_every_worker::<ShardedMap>();
}

#[test]
fn zero_readers_runs_the_putter_alone() {
    let harness = Harness::new(small_config(1, 100));
    let outcome = harness.run_trial::<LockFreeMap>(0, 0).unwrap();
    assert!(outcome.getters.is_empty());
    assert_eq!(outcome.visited, 0);
    assert_eq!(outcome.entries, 100);
}

#[test]
fn zero_trials_report_non_finite_averages() {
    let harness = Harness::new(small_config(0, 100));
    let report = harness.sweep::<ShardedMap, _>(|_| {}).unwrap();
    assert_eq!(report.points.len(), 15);
    assert!(report.points.iter().all(|p| !p.average_secs.is_finite()));
}

#[test]
fn custom_reader_range_is_honoured() {
    let harness = Harness::new(Config {
        min_readers: 3,
        max_readers: 5,
        ..small_config(1, 50)
    });
    let report = harness.sweep::<LockFreeMap, _>(|_| {}).unwrap();
    let readers: Vec<_> = report.points.iter().map(|p| p.readers).collect();
    assert_eq!(readers, vec![3, 4, 5]);
    assert!(report.plot_literal().starts_with("x = 4:6\n"));
}

#[test]
fn run_writes_one_plot_file_per_map() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(Config {
        output_dir: dir.path().to_owned(),
        write_json: true,
        ..small_config(1, 100)
    });
    harness.run::<LockFreeMap, _>(|_| {}).unwrap();
    harness.run::<ShardedMap, _>(|_| {}).unwrap();

    for name in &["papaya", "dashmap"] {
        let plot =
            fs::read_to_string(dir.path().join(format!("output_{}.txt", name))).unwrap();
        assert!(plot.starts_with("x = 2:16\ny = ["));
        assert!(plot.ends_with("]\n"));
        assert!(dir.path().join(format!("output_{}.json", name)).exists());
    }
}

#[test]
fn key_pool_matches_configuration() {
    let harness = Harness::new(small_config(1, 10));
    let pool = harness.key_pool();
    assert_eq!(pool.len(), 5);
    for key in pool.keys() {
        assert!(key.len() >= 8 && key.len() <= 50);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
