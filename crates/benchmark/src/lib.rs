//! Shipment Benchmark Suite for U-Shipping
//!
//! This crate provides:
//! - Line-oriented shipment file parser
//! - Benchmark runner packing every shipment of a dataset
//! - Result recording with the bins-per-carton ratio

mod dataset;
mod parser;
mod result;
mod runner;

pub use dataset::{Dataset, Shipment};
pub use parser::{DatasetParser, ParseError};
pub use result::{BenchmarkResult, RunResult};
pub use runner::{BenchmarkConfig, BenchmarkRunner};
