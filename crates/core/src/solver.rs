//! Solver traits and configuration.

use crate::geometry::Package;
use crate::result::PackResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits for merging cartons into bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BundleConfig {
    /// Maximum weight of a bundle in grams.
    pub max_weight: u32,

    /// Maximum girth of a bundle.
    pub max_girth: u64,

    /// Maximum number of cartons in one bundle.
    pub max_items_per_bundle: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            max_weight: 31000,
            max_girth: 3000,
            max_items_per_bundle: 6,
        }
    }
}

impl BundleConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum bundle weight.
    pub fn with_max_weight(mut self, weight: u32) -> Self {
        self.max_weight = weight;
        self
    }

    /// Sets the maximum bundle girth.
    pub fn with_max_girth(mut self, girth: u64) -> Self {
        self.max_girth = girth;
        self
    }

    /// Sets the maximum number of cartons per bundle.
    pub fn with_max_items_per_bundle(mut self, items: usize) -> Self {
        self.max_items_per_bundle = items;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_items_per_bundle == 0 {
            return Err(Error::ConfigError(
                "max_items_per_bundle must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Common configuration for packers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Container every bin is filled up to.
    pub container: Package,

    /// Maximum number of rotation evaluations after the initial greedy pass.
    pub iteration_budget: u64,

    /// Seed for the initial shuffle.
    pub seed: u64,

    /// Bundle cartons before packing (None = no bundling).
    pub bundling: Option<BundleConfig>,

    /// Spread the rotation search over the rayon thread pool.
    ///
    /// The budget still holds as an upper bound, but results are no longer
    /// reproducible across runs.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container: Package::STANDARD_CONTAINER,
            iteration_budget: 5000,
            seed: 1,
            bundling: None,
            parallel: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container.
    pub fn with_container(mut self, container: Package) -> Self {
        self.container = container.canonical();
        self
    }

    /// Sets the iteration budget of the rotation search.
    pub fn with_iteration_budget(mut self, budget: u64) -> Self {
        self.iteration_budget = budget;
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables bundling with the given limits.
    pub fn with_bundling(mut self, bundling: BundleConfig) -> Self {
        self.bundling = Some(bundling);
        self
    }

    /// Enables or disables the parallel rotation search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let dims = self.container.dimensions();
        if dims.height == 0 || dims.width == 0 || dims.length == 0 {
            return Err(Error::InvalidContainer(format!(
                "all container dimensions must be positive, got {dims}"
            )));
        }
        if let Some(bundling) = &self.bundling {
            bundling.validate()?;
        }
        Ok(())
    }
}

/// Trait for packing solvers.
pub trait Solver {
    /// Packs the given cartons into as few containers as the solver manages.
    fn solve(&self, packages: &[Package]) -> Result<PackResult>;

    /// Cancels an ongoing solve operation.
    ///
    /// The solver returns the best result found so far.
    fn cancel(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.container, Package::new(600, 400, 400).unwrap());
        assert_eq!(config.iteration_budget, 5000);
        assert_eq!(config.seed, 1);
        assert!(config.bundling.is_none());
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let container = Package::new(300, 800, 1200).unwrap();
        let config = Config::new()
            .with_container(container)
            .with_iteration_budget(100)
            .with_seed(7)
            .with_bundling(BundleConfig::default().with_max_girth(2500))
            .with_parallel(true);

        assert_eq!(config.container.height(), 1200);
        assert_eq!(config.iteration_budget, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.bundling.map(|b| b.max_girth), Some(2500));
        assert!(config.parallel);
    }

    #[test]
    fn test_bundle_config_validation() {
        assert!(BundleConfig::default().validate().is_ok());
        let bad = BundleConfig::default().with_max_items_per_bundle(0);
        assert!(matches!(bad.validate(), Err(Error::ConfigError(_))));

        let config = Config::default().with_bundling(bad);
        assert!(config.validate().is_err());
    }
}
