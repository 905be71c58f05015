use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::Result;

/// Averaged result for one reader count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Getter threads per trial.
    pub readers: usize,
    /// Trials the average is taken over.
    pub trials: usize,
    /// Mean trial wall time in seconds. NaN when `trials` is zero.
    pub average_secs: f64,
}

impl SweepPoint {
    /// Averages the summed wall time of `trials` trials.
    pub fn from_total(readers: usize, trials: usize, total: Duration) -> SweepPoint {
        SweepPoint {
            readers,
            trials,
            average_secs: total.as_secs_f64() / trials as f64,
        }
    }
}

/// The averages of a full sweep over one map, in increasing reader order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// `ConcurrentMap::NAME` of the map measured.
    pub map: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Putter threads per trial.
    pub putters: usize,
    /// One entry per reader count.
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    /// Creates an empty report.
    pub fn new(map: &str, seed: u64, putters: usize) -> SweepReport {
        SweepReport {
            map: map.to_owned(),
            seed,
            putters,
            points: Vec::new(),
        }
    }

    /// Averages in reader order.
    pub fn averages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.average_secs).collect()
    }

    /// Formats the report as a plotting-tool literal.
    ///
    /// The x axis counts all threads of a trial, putters included, so the default
    /// sweep over 1 to 15 readers gives `x = 2:16`.
    pub fn plot_literal(&self) -> String {
        let x = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => format!(
                "{}:{}",
                first.readers + self.putters,
                last.readers + self.putters
            ),
            _ => "[]".to_owned(),
        };
        let y: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("{:.6}", p.average_secs))
            .collect();
        format!("x = {}\ny = [{}]", x, y.join(" "))
    }

    /// Path of the plot file for this report inside `dir`.
    pub fn plot_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("output_{}.txt", self.map))
    }

    /// Path of the JSON file for this report inside `dir`.
    pub fn json_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("output_{}.json", self.map))
    }

    /// Writes the plot literal to `output_<map>.txt`, replacing any earlier file.
    pub fn write_plot(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = self.plot_path(dir);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{}", self.plot_literal())?;
        writer.flush()?;
        Ok(path)
    }

    /// Writes the whole report as JSON to `output_<map>.json`.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = self.json_path(dir);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(path)
    }
}
