//! Benchmark runner.

use crate::dataset::{Dataset, Shipment};
use crate::result::{BenchmarkResult, RunResult};
use std::time::Instant;
use u_shipping_binpack::Packer;
use u_shipping_core::{BundleConfig, Config, Package, Result, Solver};

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Container every shipment is packed into.
    pub container: Package,
    /// Rotation search budget per shipment.
    pub iteration_budget: u64,
    /// Shuffle seed.
    pub seed: u64,
    /// Use the parallel rotation search.
    pub parallel: bool,
    /// Bundle cartons before packing.
    pub bundling: Option<BundleConfig>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        let solver = Config::default();
        Self {
            container: solver.container,
            iteration_budget: solver.iteration_budget,
            seed: solver.seed,
            parallel: solver.parallel,
            bundling: solver.bundling,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a configuration with the packer defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, container: Package) -> Self {
        self.container = container;
        self
    }

    pub fn with_iteration_budget(mut self, budget: u64) -> Self {
        self.iteration_budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_bundling(mut self, bundling: Option<BundleConfig>) -> Self {
        self.bundling = bundling;
        self
    }

    /// Builds the solver configuration.
    pub fn solver_config(&self) -> Config {
        let config = Config::new()
            .with_container(self.container)
            .with_iteration_budget(self.iteration_budget)
            .with_seed(self.seed)
            .with_parallel(self.parallel);
        match self.bundling {
            Some(bundling) => config.with_bundling(bundling),
            None => config,
        }
    }
}

/// Runs the packer over every shipment of a dataset.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a new runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Packs one shipment.
    pub fn run_shipment(&self, packer: &Packer, shipment: &Shipment) -> Result<RunResult> {
        let result = packer.solve(&shipment.packages)?;
        Ok(RunResult::new(shipment.line, shipment.packages.len(), &result))
    }

    /// Packs every shipment of `dataset`.
    ///
    /// # Errors
    ///
    /// Fails only on an invalid configuration; shipments with cartons that
    /// cannot be placed are recorded as invalid runs.
    pub fn run_dataset(&self, dataset: &Dataset) -> Result<BenchmarkResult> {
        let packer = Packer::new(self.config.solver_config());
        let start = Instant::now();

        let mut result = BenchmarkResult::new();
        result.name = dataset.name.clone();
        result.container = self.config.container.to_string();
        for shipment in &dataset.shipments {
            result.add_run(self.run_shipment(&packer, shipment)?);
        }
        result.total_time_ms = start.elapsed().as_millis() as u64;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DatasetParser;

    #[test]
    fn test_run_dataset() {
        let content = "\
135x200x250 170x380x390 485x280x590 254x171x368 201x172x349 254x171x368
100x100x100 100x100x100
";
        let dataset = DatasetParser::new().parse_str("test", content).unwrap();
        let runner = BenchmarkRunner::new(BenchmarkConfig::new().with_iteration_budget(500));
        let result = runner.run_dataset(&dataset).unwrap();

        assert_eq!(result.runs.len(), 2);
        assert_eq!(result.container, "600x400x400");
        assert!(!result.runs[0].is_valid());
        assert_eq!(result.runs[0].summary.oversize, 1);
        assert_eq!(result.packages_total(), 2);
        assert_eq!(result.bins_total(), 1);
        assert_eq!(result.ratio_percent(), Some(50.0));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = BenchmarkConfig::new()
            .with_bundling(Some(BundleConfig::default().with_max_items_per_bundle(0)));
        let dataset = DatasetParser::new().parse_str("test", "100x100x100").unwrap();
        assert!(BenchmarkRunner::new(config).run_dataset(&dataset).is_err());
    }
}
