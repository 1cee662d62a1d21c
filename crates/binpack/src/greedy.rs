//! Greedy strip/layer/bin packer.
//!
//! Cartons are packed on an implicit grid made of three nested levels:
//!
//! - **Strip**: cartons stacked along the container height.
//! - **Layer**: strips placed side by side along the container width.
//! - **Bin**: layers placed one after another along the container length.
//!
//! Every level consumes cartons from the front of a shared pending list. A
//! carton that does not fit ends the current strip and stays at the front of
//! the list, so it is retried by the next strip, layer or bin. The packer is
//! deterministic: the same input order always produces the same bins.

use std::collections::VecDeque;
use u_shipping_core::{Dimensions, Package};

/// Cartons packed by one strip, layer or bin, and the space they take up.
#[derive(Debug, Clone, Default)]
pub struct Packed {
    /// Cartons in the order they were packed.
    pub packages: Vec<Package>,
    /// Accumulated extent along the container axes.
    pub extent: Dimensions,
}

impl Packed {
    /// Returns true if nothing was packed.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Result of packing a whole list.
#[derive(Debug, Clone, Default)]
pub struct GreedyPack {
    /// Filled containers.
    pub bins: Vec<Vec<Package>>,
    /// Extent of each filled container, parallel to `bins`.
    pub extents: Vec<Dimensions>,
    /// Cartons no container could take.
    pub rest: Vec<Package>,
}

impl GreedyPack {
    /// Returns the number of bins used.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}

/// State of one packing attempt.
///
/// Holds the container, the pending cartons (consumed front to back) and the
/// bins filled so far. A run is used once and thrown away.
#[derive(Debug, Clone)]
pub struct PackRun {
    container: Dimensions,
    pending: VecDeque<Package>,
    bins: Vec<Vec<Package>>,
    extents: Vec<Dimensions>,
}

impl PackRun {
    /// Creates a run over `packages` in the given order.
    pub fn new(container: &Package, packages: impl IntoIterator<Item = Package>) -> Self {
        Self {
            container: container.dimensions(),
            pending: packages.into_iter().collect(),
            bins: Vec::new(),
            extents: Vec::new(),
        }
    }

    /// Returns the cartons not packed yet.
    pub fn pending(&self) -> &VecDeque<Package> {
        &self.pending
    }

    /// Stacks cartons from the front of the pending list along the height axis.
    ///
    /// Extent: (summed height, widest carton, longest carton).
    pub fn pack_strip(&mut self) -> Packed {
        let limit = self.container.height;
        let mut strip = Packed::default();

        while let Some(next) = self.pending.front() {
            if exceeds(strip.extent.height, next.height(), limit) {
                break;
            }
            let Some(next) = self.pending.pop_front() else {
                break;
            };
            strip.extent.height += next.height();
            strip.extent.width = strip.extent.width.max(next.width());
            strip.extent.length = strip.extent.length.max(next.length());
            strip.packages.push(next);
        }

        strip
    }

    /// Places strips side by side along the width axis.
    ///
    /// A strip that would overflow the width goes back to the front of the
    /// pending list and closes the layer.
    ///
    /// Extent: (tallest strip, summed width, longest strip).
    pub fn pack_layer(&mut self) -> Packed {
        let limit = self.container.width;
        let mut layer = Packed::default();

        while !self.pending.is_empty() {
            let strip = self.pack_strip();
            if strip.is_empty() {
                break;
            }
            if exceeds(layer.extent.width, strip.extent.width, limit) {
                self.push_back(strip.packages);
                break;
            }
            layer.extent.width += strip.extent.width;
            layer.extent.height = layer.extent.height.max(strip.extent.height);
            layer.extent.length = layer.extent.length.max(strip.extent.length);
            layer.packages.extend(strip.packages);
        }

        layer
    }

    /// Fills one container with layers along the length axis.
    ///
    /// The pending list is first sorted by ascending volume (stable). This is
    /// the order reference outputs were produced with.
    ///
    /// Extent: (tallest layer, widest layer, summed length).
    pub fn pack_container(&mut self) -> Packed {
        self.pending.make_contiguous().sort_by(Package::cmp_volume);

        let limit = self.container.length;
        let mut bin = Packed::default();

        while !self.pending.is_empty() {
            let layer = self.pack_layer();
            if layer.is_empty() {
                break;
            }
            if exceeds(bin.extent.length, layer.extent.length, limit) {
                self.push_back(layer.packages);
                break;
            }
            bin.extent.length += layer.extent.length;
            bin.extent.height = bin.extent.height.max(layer.extent.height);
            bin.extent.width = bin.extent.width.max(layer.extent.width);
            bin.packages.extend(layer.packages);
        }

        bin
    }

    /// Fills containers until the list is empty or a container stays empty.
    pub fn run(mut self) -> GreedyPack {
        self.pending.make_contiguous().sort_by(Package::cmp_volume);

        while !self.pending.is_empty() {
            let bin = self.pack_container();
            if bin.is_empty() {
                break;
            }
            self.extents.push(bin.extent);
            self.bins.push(bin.packages);
        }

        GreedyPack {
            bins: self.bins,
            extents: self.extents,
            rest: self.pending.into(),
        }
    }

    /// Returns packed cartons to the front of the pending list, keeping their order.
    fn push_back(&mut self, packages: Vec<Package>) {
        for package in packages.into_iter().rev() {
            self.pending.push_front(package);
        }
    }
}

fn exceeds(used: u32, extra: u32, limit: u32) -> bool {
    u64::from(used) + u64::from(extra) > u64::from(limit)
}

/// Packs `packages` into as many `container`s as needed.
///
/// Cartons are used as oriented; callers are expected to remove cartons
/// that cannot fit the container on their own. Such cartons block the run
/// and end up in [`GreedyPack::rest`] together with everything behind them.
pub fn pack_all(container: &Package, packages: impl IntoIterator<Item = Package>) -> GreedyPack {
    PackRun::new(container, packages).run()
}
