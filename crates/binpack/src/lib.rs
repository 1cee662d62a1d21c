//! # U-Shipping Binpack
//!
//! Carton packing algorithms for the U-Shipping engine.
//!
//! Cartons are packed on an implicit grid: stacked into strips along the
//! container height, strips placed side by side into layers, layers lined up
//! along the container length. A rotation search tries other orientations on
//! top of that and keeps the packing with the fewest containers.
//!
//! ## Quick Start
//!
//! ```rust
//! use u_shipping_binpack::{pack, Package};
//!
//! let packages: Vec<Package> = ["135x200x250", "170x380x390", "485x280x590"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let (bins, leftover) = pack(None, &packages).unwrap();
//! assert_eq!(bins.len(), 1);
//! assert_eq!(leftover, vec![Package::parse("590x485x280").unwrap()]);
//! ```

pub mod bundler;
pub mod greedy;
pub mod packer;
pub mod rotation;

// Re-exports
pub use bundler::{bundle, bundle_with_defaults, max_stack_factor};
pub use greedy::{pack_all, GreedyPack, PackRun, Packed};
pub use packer::{pack, Packer};
pub use rotation::{optimize, optimize_parallel, optimize_with_cancel, SearchOutcome};
pub use u_shipping_core::{
    BundleConfig, BundleResult, Config, Dimensions, Error, PackResult, Package, Result, Solver,
    StopReason,
};
