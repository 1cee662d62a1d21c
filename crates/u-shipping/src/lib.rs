//! # U-Shipping
//!
//! Carton packing engine for shipping estimates.
//!
//! This crate provides:
//! - **Packing**: how many containers a set of cartons needs
//! - **Bundling**: strapping cartons with a common side into fewer parcels
//!
//! ## Quick Start
//!
//! ```rust
//! use u_shipping::binpack::{bundle_with_defaults, pack};
//! use u_shipping::Package;
//!
//! let packages = vec![Package::parse("800x310x250").unwrap(); 4];
//!
//! let bundled = bundle_with_defaults(&packages);
//! assert_eq!(bundled.bundle_count, 1);
//!
//! let container = Package::parse("1200x800x800").unwrap();
//! let (bins, leftover) = pack(Some(&container), &bundled.packages()).unwrap();
//! assert_eq!(bins.len(), 1);
//! assert!(leftover.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `binpack` (default): packing and bundling algorithms
//! - `serde`: Serialization support

/// Core types and abstractions.
pub use u_shipping_core as core;

/// Packing and bundling algorithms.
#[cfg(feature = "binpack")]
pub use u_shipping_binpack as binpack;

// Re-export commonly used types at root level
pub use u_shipping_core::{
    BundleConfig, BundleResult, Config, Error, PackResult, Package, Result, Solver, StopReason,
};
