//! Packing solver.

use crate::bundler::bundle;
use crate::rotation::{optimize_parallel, optimize_with_cancel, SearchOutcome};
use u_shipping_core::solver::{Config, Solver};
use u_shipping_core::{Package, PackResult, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Carton packing solver.
///
/// Runs the optional bundling pass, then the rotation search over the greedy
/// strip/layer/bin packer.
pub struct Packer {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl Packer {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a handle that cancels the running search when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    fn search(&self, packages: &[Package]) -> SearchOutcome {
        let config = &self.config;
        if config.parallel {
            optimize_parallel(
                &config.container,
                packages,
                config.iteration_budget,
                config.seed,
                &self.cancelled,
            )
        } else {
            optimize_with_cancel(
                &config.container,
                packages,
                config.iteration_budget,
                config.seed,
                &self.cancelled,
            )
        }
    }
}

impl Solver for Packer {
    fn solve(&self, packages: &[Package]) -> Result<PackResult> {
        self.config.validate()?;

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);
        let start = Instant::now();

        let mut bundles = 0;
        let mut todo = match &self.config.bundling {
            Some(bundling) => {
                let bundled = bundle(packages, bundling);
                bundles = bundled.bundle_count;
                bundled.packages()
            }
            None => packages.to_vec(),
        };
        todo.sort_by(|a, b| b.cmp_volume(a));

        let outcome = self.search(&todo);
        if !outcome.oversize.is_empty() {
            log::warn!(
                "{} cartons do not fit container {}",
                outcome.oversize.len(),
                self.config.container
            );
        }

        Ok(PackResult {
            bins: outcome.bins,
            oversize: outcome.oversize,
            rest: outcome.rest,
            evaluations: outcome.evaluations,
            stop_reason: outcome.stop_reason,
            bundles,
            computation_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Packs `packages` into containers and returns `(bins, leftover)`.
///
/// Uses the standard 600x400x400 container when `container` is `None`, the
/// default budget of 5000 evaluations and seed 1. `leftover` lists the
/// oversize cartons first, then any carton the best packing could not place.
pub fn pack(
    container: Option<&Package>,
    packages: &[Package],
) -> Result<(Vec<Vec<Package>>, Vec<Package>)> {
    let mut config = Config::default();
    if let Some(container) = container {
        config = config.with_container(*container);
    }
    let result = Packer::new(config).solve(packages)?;
    Ok(result.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_shipping_core::{BundleConfig, StopReason};

    fn pkg(s: &str) -> Package {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_packer() {
        let packer = Packer::default_config();
        let packages = vec![pkg("100x100x100"); 4];
        let result = packer.solve(&packages).unwrap();

        assert_eq!(result.bin_count(), 1);
        assert_eq!(result.packed_count(), 4);
        assert!(result.all_packed());
        assert_eq!(result.stop_reason, StopReason::Optimal);
    }

    #[test]
    fn test_pack_defaults_to_standard_container() {
        let (bins, leftover) = pack(None, &[pkg("600x400x400"), pkg("700x100x100")]).unwrap();
        assert_eq!(bins, vec![vec![pkg("600x400x400")]]);
        assert_eq!(leftover, vec![pkg("700x100x100")]);
    }

    #[test]
    fn test_pack_empty() {
        let (bins, leftover) = pack(Some(&pkg("600x400x400")), &[]).unwrap();
        assert!(bins.is_empty());
        assert!(leftover.is_empty());
    }

    #[test]
    fn test_pack_custom_container() {
        let container = pkg("1200x800x300");
        let (bins, leftover) = pack(Some(&container), &[pkg("700x100x100")]).unwrap();
        assert_eq!(bins.len(), 1);
        assert!(leftover.is_empty());
    }

    #[test]
    fn test_solve_with_bundling() {
        let config = Config::default()
            .with_container(pkg("1200x800x800"))
            .with_bundling(BundleConfig::default());
        let packer = Packer::new(config);
        let packages = vec![pkg("800x310x250"); 4];
        let result = packer.solve(&packages).unwrap();

        assert_eq!(result.bundles, 1);
        assert_eq!(result.packed_count(), 2);
        assert_eq!(result.bin_count(), 1);
    }

    #[test]
    fn test_invalid_bundle_config() {
        let config =
            Config::default().with_bundling(BundleConfig::default().with_max_items_per_bundle(0));
        let result = Packer::new(config).solve(&[pkg("100x100x100")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cancel_handle() {
        let packer = Packer::default_config();
        let handle = packer.cancel_handle();
        packer.cancel();
        assert!(handle.load(Ordering::Relaxed));

        // solve resets the flag before searching
        let result = packer.solve(&[pkg("100x100x100")]).unwrap();
        assert_eq!(result.bin_count(), 1);
        assert!(!handle.load(Ordering::Relaxed));
    }

    #[test]
    fn test_parallel_solve() {
        let config = Config::default().with_parallel(true).with_iteration_budget(200);
        let packages = vec![
            pkg("135x200x250"),
            pkg("170x380x390"),
            pkg("485x280x590"),
            pkg("254x171x368"),
            pkg("201x172x349"),
            pkg("254x171x368"),
        ];
        let result = Packer::new(config).solve(&packages).unwrap();

        assert_eq!(result.bin_count(), 2);
        assert_eq!(result.oversize, vec![pkg("590x485x280")]);
        assert!(result.evaluations <= 200);
    }
}
