//! Solve result representation.

use crate::geometry::Package;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a rotation search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// Every orientation combination was evaluated.
    #[default]
    Exhausted,
    /// The iteration budget ran out.
    BudgetExceeded,
    /// A single container holds everything; nothing left to improve.
    Optimal,
    /// The caller cancelled the search.
    Cancelled,
}

impl StopReason {
    /// Returns true if the search ended before trying every combination.
    pub fn is_early(&self) -> bool {
        !matches!(self, StopReason::Exhausted)
    }
}

/// Result of a packing run.
///
/// Bin order and the order inside a bin carry no meaning; only membership
/// and the number of bins do.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackResult {
    /// Filled containers, each holding the cartons assigned to it.
    pub bins: Vec<Vec<Package>>,

    /// Cartons larger than the container on some axis.
    pub oversize: Vec<Package>,

    /// Cartons that fit the container but were not placed.
    pub rest: Vec<Package>,

    /// Number of rotation evaluations performed.
    pub evaluations: u64,

    /// Why the search stopped.
    pub stop_reason: StopReason,

    /// Number of bundles formed before packing.
    pub bundles: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PackResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bins used.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Returns the number of cartons placed in a bin.
    pub fn packed_count(&self) -> usize {
        self.bins.iter().map(Vec::len).sum()
    }

    /// Returns oversize cartons followed by the unplaced rest.
    pub fn leftover(&self) -> Vec<Package> {
        self.oversize.iter().chain(self.rest.iter()).copied().collect()
    }

    /// Returns true if every carton was placed.
    pub fn all_packed(&self) -> bool {
        self.oversize.is_empty() && self.rest.is_empty()
    }

    /// Returns the packed volume divided by the volume of the bins used.
    pub fn utilization(&self, container: &Package) -> f64 {
        let capacity = container.volume() as f64 * self.bins.len() as f64;
        if capacity <= 0.0 {
            return 0.0;
        }
        let packed: u64 = self.bins.iter().flatten().map(Package::volume).sum();
        packed as f64 / capacity
    }

    /// Splits the result into the `(bins, leftover)` pair.
    pub fn into_parts(self) -> (Vec<Vec<Package>>, Vec<Package>) {
        let mut leftover = self.oversize;
        leftover.extend(self.rest);
        (self.bins, leftover)
    }
}

/// Output of the bundling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BundleResult {
    /// Number of bundles formed.
    pub bundle_count: usize,

    /// Bundles that absorbed at least one other carton.
    pub merged: Vec<Package>,

    /// Cartons that were not merged with anything.
    pub unmerged: Vec<Package>,
}

impl BundleResult {
    /// Returns every output carton, bundles first.
    pub fn packages(&self) -> Vec<Package> {
        self.merged.iter().chain(self.unmerged.iter()).copied().collect()
    }

    /// Returns the number of output cartons.
    pub fn len(&self) -> usize {
        self.merged.len() + self.unmerged.len()
    }

    /// Returns true if there are no output cartons.
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty() && self.unmerged.is_empty()
    }
}

/// Summary of a pack result for reporting.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackSummary {
    /// Number of bins used.
    pub bin_count: usize,
    /// Number of packed cartons.
    pub packed: usize,
    /// Number of oversize cartons.
    pub oversize: usize,
    /// Number of unplaced cartons that would fit the container.
    pub rest: usize,
    /// Rotation evaluations performed.
    pub evaluations: u64,
    /// Why the search stopped.
    pub stop_reason: StopReason,
    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl From<&PackResult> for PackSummary {
    fn from(result: &PackResult) -> Self {
        Self {
            bin_count: result.bin_count(),
            packed: result.packed_count(),
            oversize: result.oversize.len(),
            rest: result.rest.len(),
            evaluations: result.evaluations,
            stop_reason: result.stop_reason,
            computation_time_ms: result.computation_time_ms,
        }
    }
}
