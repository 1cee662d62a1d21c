//! Benchmark result recording.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use u_shipping_core::{PackResult, PackSummary};

/// Outcome of packing one shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Line of the shipment in the dataset file.
    pub line: usize,
    /// Cartons in the shipment before bundling.
    pub packages: usize,
    /// Packing statistics.
    pub summary: PackSummary,
}

impl RunResult {
    /// Records the result of packing a shipment.
    pub fn new(line: usize, packages: usize, result: &PackResult) -> Self {
        Self {
            line,
            packages,
            summary: PackSummary::from(result),
        }
    }

    /// Returns true if every carton was placed.
    pub fn is_valid(&self) -> bool {
        self.summary.oversize == 0 && self.summary.rest == 0
    }
}

/// Results of a benchmark over a whole dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Dataset name.
    pub name: String,
    /// Container used, as `HxWxL`.
    pub container: String,
    /// One entry per shipment.
    pub runs: Vec<RunResult>,
    /// Wall-clock time of the whole benchmark in milliseconds.
    pub total_time_ms: u64,
}

impl BenchmarkResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a run.
    pub fn add_run(&mut self, run: RunResult) {
        self.runs.push(run);
    }

    /// Returns the runs with cartons that could not be placed.
    pub fn invalid_runs(&self) -> impl Iterator<Item = &RunResult> {
        self.runs.iter().filter(|r| !r.is_valid())
    }

    /// Total cartons over the fully packed shipments.
    pub fn packages_total(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| r.packages)
            .sum()
    }

    /// Total bins over the fully packed shipments.
    pub fn bins_total(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| r.summary.bin_count)
            .sum()
    }

    /// Bins per carton in percent. `None` if no shipment was fully packed.
    pub fn ratio_percent(&self) -> Option<f64> {
        let packages = self.packages_total();
        if packages == 0 {
            return None;
        }
        Some(self.bins_total() as f64 * 100.0 / packages as f64)
    }

    /// Prints a summary to stdout.
    pub fn print_summary(&self) {
        println!("\nBenchmark: {} (container {})", self.name, self.container);
        println!("{:-<60}", "");

        for run in self.invalid_runs() {
            println!(
                "  invalid data on line {}: {} oversize, {} left over",
                run.line, run.summary.oversize, run.summary.rest
            );
        }

        let evaluations: u64 = self.runs.iter().map(|r| r.summary.evaluations).sum();
        println!("  Shipments:   {}", self.runs.len());
        println!("  Invalid:     {}", self.invalid_runs().count());
        println!("  Packages:    {}", self.packages_total());
        println!("  Bins:        {}", self.bins_total());
        match self.ratio_percent() {
            Some(ratio) => println!("  Ratio:       {:.2}%", ratio),
            None => println!("  Ratio:       n/a"),
        }
        println!("  Evaluations: {}", evaluations);
        println!("  Time:        {}ms", self.total_time_ms);
    }

    /// Saves the result as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Saves one CSV row per shipment.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut csv =
            String::from("line,packages,bins,oversize,rest,evaluations,stop_reason,time_ms\n");
        for run in &self.runs {
            let s = &run.summary;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{:?},{}\n",
                run.line,
                run.packages,
                s.bin_count,
                s.oversize,
                s.rest,
                s.evaluations,
                s.stop_reason,
                s.computation_time_ms
            ));
        }
        fs::write(path, csv)?;
        Ok(())
    }
}
