//! # Classifier Metrics
//!
//! Confusion matrices and classification metrics (recall, precision, F1,
//! accuracy) for evaluating a trained classifier against ground truth.
//!
//! ## Features
//!
//! - **Three regimes**: a fixed 2x2 binary matrix, an NxN multi-class matrix,
//!   and independent per-label counters for multi-label classification.
//! - **Deterministic ordering**: labels are always sorted, so matrices,
//!   metric lists and rendered tables are stable across runs.
//! - **Explicit undefined values**: multi-label metrics distinguish "zero"
//!   from "not applicable".
//! - **DataFrame Integration**: observations can be read from Polars
//!   DataFrames or CSV, weighted by row or by a `Count` column.
//!
//! ## Quick Start
//!
//! ```rust
//! use classifier_metrics::{ConfusionReport, MultiClassConfusionMatrix, ObservationSet};
//!
//! # fn main() -> classifier_metrics::Result<()> {
//! classifier_metrics::init()?;
//!
//! let observations = ObservationSet::from_counted([
//!     ("bird", "bird", 80), ("bird", "cat", 10), ("bird", "dog", 10),
//!     ("cat", "bird", 10), ("cat", "cat", 80), ("cat", "dog", 10),
//!     ("dog", "bird", 10), ("dog", "cat", 10), ("dog", "dog", 80),
//! ]);
//!
//! if let Some(matrix) = MultiClassConfusionMatrix::new(&observations) {
//!     for metrics in matrix.calculate_metrics() {
//!         println!("{}: {:?}", metrics.label, metrics.f1);
//!     }
//!     println!("{}", matrix.render_table());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Types, constants, error handling and the [`ConfusionReport`] trait
//! - [`config`]: Column roles, ingestion mode and threshold configuration
//! - [`metrics`]: Metric math, validation, ingestion, the matrix variants and rendering

#![doc(html_root_url = "https://docs.rs/classifier-metrics/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Confusion matrices and metrics
pub mod metrics;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{MetricsError, Result, ValidationError},
    traits::*,
    types::*,
};

// Re-export configuration functionality
pub use config::{ColumnRoles, EvaluationConfig, EvaluationConfigBuilder};

// Re-export metrics functionality
pub use metrics::{
    render_metrics_table, BinaryConfusionMatrix, ConfusionMatrixKind, LabelConstraint,
    MultiClassConfusionMatrix, MultiLabelConfusionMatrix, ObservationSet,
};

// Version information
pub use crate::core::constants::CLASSIFIER_METRICS_VERSION as VERSION;

/// Initialize logging for the library.
///
/// Installs `env_logger` unless the host already installed a logger.
/// Calling it is optional; without it log records are simply dropped.
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}

/// Get library capabilities and feature information.
pub fn capabilities() -> crate::core::CoreCapabilities {
    crate::core::CoreCapabilities::current()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_initialization() {
        assert!(init().is_ok());
        assert!(is_initialized());
    }

    #[test]
    fn test_capabilities() {
        let caps = capabilities();
        assert_eq!(caps.polars_ingestion, cfg!(feature = "polars"));
        assert_eq!(caps.csv_ingestion, cfg!(feature = "csv"));
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_integration() {
        let err = MetricsError::config("test error");
        assert_eq!(err.category(), "config");
    }
}
