//! # U-Shipping Core
//!
//! Core types and abstractions for the U-Shipping packing engine.
//!
//! This crate provides the value types shared by the packing algorithms and
//! the applications that feed them cartons.
//!
//! ## Core Components
//!
//! - **Geometry**: `Dimensions` and the canonical `Package` value type
//! - **Solver trait**: Common interface for packers, with `Config` and `BundleConfig`
//! - **Results**: `PackResult`, `BundleResult`, `StopReason`
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{Dimensions, Package};
pub use result::{BundleResult, PackResult, PackSummary, StopReason};
pub use solver::{BundleConfig, Config, Solver};
