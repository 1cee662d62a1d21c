//! Bundling of cartons with a common side.
//!
//! Consecutive cartons that share two side lengths can be strapped together
//! into one taller carton, which reduces the number of parcels a carrier
//! charges for. The pass is a single left-to-right scan: it never reorders
//! its input and never revisits a decision, so the result depends on the
//! order the caller supplies.

use u_shipping_core::{BundleConfig, BundleResult, Package};

/// Merges consecutive cartons into bundles within the limits of `config`.
///
/// A carton joins the current bundle when it shares a side with it, the
/// combined weight and girth stay within the limits and the bundle has room
/// for another carton. Otherwise the current bundle is closed and the carton
/// starts a new one.
pub fn bundle(packages: &[Package], config: &BundleConfig) -> BundleResult {
    let mut result = BundleResult::default();
    let mut iter = packages.iter().copied();
    let Some(mut current) = iter.next() else {
        return result;
    };
    let mut items = 1usize;

    for next in iter {
        match try_merge(&current, &next, items, config) {
            Some(merged) => {
                if items == 1 {
                    result.bundle_count += 1;
                }
                current = merged;
                items += 1;
            }
            None => {
                close(&mut result, current, items);
                current = next;
                items = 1;
            }
        }
    }
    close(&mut result, current, items);

    log::debug!(
        "Bundled {} cartons into {} bundles, {} left single",
        packages.len(),
        result.bundle_count,
        result.unmerged.len()
    );
    result
}

/// Bundles with the default carrier limits (31 kg, girth 3000, 6 cartons).
pub fn bundle_with_defaults(packages: &[Package]) -> BundleResult {
    bundle(packages, &BundleConfig::default())
}

/// Returns how many copies of `package` can be stacked into one bundle.
///
/// Only weight and girth are checked. Returns 0 if a single carton already
/// breaks a limit.
pub fn max_stack_factor(package: &Package, config: &BundleConfig) -> u32 {
    let mut factor = 0;
    loop {
        let next = factor + 1;
        match package.stacked(next) {
            Ok(stack) if within_limits(&stack, config) => factor = next,
            _ => return factor,
        }
    }
}

fn try_merge(
    current: &Package,
    next: &Package,
    items: usize,
    config: &BundleConfig,
) -> Option<Package> {
    if items >= config.max_items_per_bundle || !current.shares_two_sides(next) {
        return None;
    }
    let merged = current.merge(next).ok()?;
    within_limits(&merged, config).then_some(merged)
}

fn within_limits(package: &Package, config: &BundleConfig) -> bool {
    package.weight() <= config.max_weight && package.girth() <= config.max_girth
}

fn close(result: &mut BundleResult, package: Package, items: usize) {
    if items > 1 {
        result.merged.push(package);
    } else {
        result.unmerged.push(package);
    }
}
