//! Configuration for the classifier metrics engine.
//!
//! Column roles name the actual, predicted and count columns of tabular
//! inputs; [`EvaluationConfig`] bundles them with the ingestion mode and the
//! multi-label threshold and can be loaded from JSON, TOML or the
//! environment.

pub mod core;

pub use self::core::{EvaluationConfig, EvaluationConfigBuilder};

use crate::core::constants::{COUNT_COLUMN, DEFAULT_ACTUAL_COLUMN, DEFAULT_PREDICTED_COLUMN};
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "classifier_metrics.toml";

/// Which columns of a tabular source play which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    /// Ground-truth label column
    pub actual: String,
    /// Predicted label column
    pub predicted: String,
    /// Pre-aggregated frequency column, read only in count ingestion
    pub count: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        ColumnRoles {
            actual: DEFAULT_ACTUAL_COLUMN.to_string(),
            predicted: DEFAULT_PREDICTED_COLUMN.to_string(),
            count: COUNT_COLUMN.to_string(),
        }
    }
}

impl ColumnRoles {
    /// Roles with custom label columns and the default count column.
    pub fn new<A: Into<String>, P: Into<String>>(actual: A, predicted: P) -> Self {
        ColumnRoles {
            actual: actual.into(),
            predicted: predicted.into(),
            count: COUNT_COLUMN.to_string(),
        }
    }

    /// Override the count column name.
    pub fn with_count_column<S: Into<String>>(mut self, count: S) -> Self {
        self.count = count.into();
        self
    }
}
