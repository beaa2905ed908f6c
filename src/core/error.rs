//! Error handling and error types for the classifier metrics engine.
//!
//! Construction of a confusion matrix never raises: the public constructors
//! return `Option` and the `try_*` variants surface a [`ValidationError`].
//! [`MetricsError`] covers everything around the engine itself, such as
//! reading observations from CSV or loading configuration files.

use std::collections::BTreeSet;
use std::io;
use thiserror::Error;

/// Main error type for the classifier metrics library.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading {
        /// What failed while reading observations
        message: String,
    },

    /// Observation set rejected by label-set validation
    #[error("Validation error: {source}")]
    Validation {
        /// Underlying validation failure
        #[from]
        source: ValidationError,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[cfg(feature = "csv")]
    #[error("CSV parsing error: {source}")]
    Csv {
        /// Underlying CSV error
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// TOML deserialization errors
    #[error("TOML error: {source}")]
    Toml {
        /// Underlying TOML error
        #[from]
        source: toml::de::Error,
    },
}

/// Reasons an observation set cannot become a confusion matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No observations were ingested
    #[error("Empty observation set provided")]
    Empty,

    /// Observations exist but one role has no labels
    #[error("No observations for the {role} role")]
    MissingRole {
        /// `"actual"` or `"predicted"`
        role: &'static str,
    },

    /// A tabular source lacks a configured column
    #[error("Required column '{column}' not found")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// Multi-class predicted and actual label sets differ

    #[error(
        "Predicted and actual label sets differ: missing in predicted {missing_in_predicted:?}, unseen in actual {unseen_in_actual:?}"
    )]
    LabelSetMismatch {
        /// Actual labels that were never predicted
        missing_in_predicted: BTreeSet<String>,
        /// Predicted labels that never occur as ground truth
        unseen_in_actual: BTreeSet<String>,
    },

    /// Binary predictions include a label outside the actual pair
    #[error("Predicted labels never seen as ground truth: {labels:?}")]
    PredictedNotInActual {
        /// The offending predicted labels
        labels: BTreeSet<String>,
    },

    /// Wrong number of distinct actual labels
    #[error("Expected exactly {expected} distinct actual labels, got {actual}")]
    Cardinality {
        /// Required label count
        expected: usize,
        /// Label count found
        actual: usize,
    },
}

/// Type alias for Results using MetricsError
pub type Result<T> = std::result::Result<T, MetricsError>;

impl MetricsError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        MetricsError::Config {
            message: message.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        MetricsError::DataLoading {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        MetricsError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            MetricsError::Config { .. } => "config",
            MetricsError::InvalidParameter { .. } => "invalid_parameter",
            MetricsError::DataLoading { .. } => "data_loading",
            MetricsError::Validation { .. } => "validation",
            MetricsError::IO { .. } => "io",
            #[cfg(feature = "csv")]
            MetricsError::Csv { .. } => "csv",
            MetricsError::Json { .. } => "json",
            MetricsError::Toml { .. } => "toml",
        }
    }

    /// Returns the validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            MetricsError::Validation { source } => Some(source),
            _ => None,
        }
    }
}

/// Build a [`MetricsError::Config`] from a message or format arguments.
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::MetricsError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::MetricsError::config(format!($fmt, $($arg)*))
    };
}

/// Return early with `$err` converted into the caller's error type unless
/// `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
