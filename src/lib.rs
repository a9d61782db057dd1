//! # Burn Benchmarks
#![forbid(unsafe_code)]

/// Benchmark tasks and the hooks they implement
pub mod benchmarks;

/// Dataset records and transformations
pub mod datasets;

/// Errors
pub mod error;

/// Execution frameworks
pub mod frameworks;

/// Structured logging
pub mod logging;

/// Evaluation metrics
pub mod metrics;

/// Utilities
pub mod utils;

pub use benchmarks::{evaluate, BenchmarkDataset, TextClassificationBenchmark};
pub use error::{Error, Result};
