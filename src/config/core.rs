//! Evaluation configuration and its builder.

use crate::config::ColumnRoles;
use crate::core::constants::*;
use crate::core::error::{MetricsError, Result};
use crate::core::types::IngestionMode;
use crate::ensure;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings a training pipeline hands to the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Column names for actual, predicted and count
    pub columns: ColumnRoles,
    /// Whether tabular rows are weighted by the count column
    pub ingestion: IngestionMode,
    /// Multi-label confidence threshold, reported but never applied
    pub threshold: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            columns: ColumnRoles::default(),
            ingestion: IngestionMode::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EvaluationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a configuration
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::new()
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold),
            MetricsError::invalid_parameter(
                "threshold",
                self.threshold.to_string(),
                "must be in range [0.0, 1.0]",
            )
        );

        let names = [
            ("columns.actual", &self.columns.actual),
            ("columns.predicted", &self.columns.predicted),
            ("columns.count", &self.columns.count),
        ];
        for (parameter, name) in names {
            ensure!(
                !name.trim().is_empty(),
                MetricsError::invalid_parameter(parameter, name.as_str(), "must not be empty")
            );
        }

        ensure!(
            self.columns.actual != self.columns.predicted,
            MetricsError::invalid_parameter(
                "columns.predicted",
                self.columns.predicted.as_str(),
                "must differ from the actual column",
            )
        );

        if self.ingestion == IngestionMode::ByCount {
            ensure!(
                self.columns.count != self.columns.actual && self.columns.count != self.columns.predicted,
                MetricsError::invalid_parameter(
                    "columns.count",
                    self.columns.count.as_str(),
                    "must differ from the label columns",
                )
            );
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MetricsError::config(format!("Failed to read config file: {}", e)))?;

        let config: EvaluationConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(MetricsError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        log::debug!("Loaded evaluation config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| MetricsError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(MetricsError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn load_from_environment() -> Result<Self> {
        let mut config = EvaluationConfig::default();

        if let Ok(val) = std::env::var("CLASSIFIER_METRICS_ACTUAL_COLUMN") {
            config.columns.actual = val;
        }

        if let Ok(val) = std::env::var("CLASSIFIER_METRICS_PREDICTED_COLUMN") {
            config.columns.predicted = val;
        }

        if let Ok(val) = std::env::var("CLASSIFIER_METRICS_COUNT_COLUMN") {
            config.columns.count = val;
        }

        if let Ok(val) = std::env::var("CLASSIFIER_METRICS_INGESTION") {
            config.ingestion = val
                .parse()
                .map_err(|_| MetricsError::config("Invalid CLASSIFIER_METRICS_INGESTION"))?;
        }

        if let Ok(val) = std::env::var("CLASSIFIER_METRICS_THRESHOLD") {
            config.threshold = val
                .parse()
                .map_err(|_| MetricsError::config("Invalid CLASSIFIER_METRICS_THRESHOLD"))?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`EvaluationConfig`].
#[derive(Debug)]
pub struct EvaluationConfigBuilder {
    config: EvaluationConfig,
    validation_errors: Vec<String>,
}

impl EvaluationConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        EvaluationConfigBuilder {
            config: EvaluationConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the ground-truth column name
    pub fn actual_column<S: Into<String>>(mut self, name: S) -> Self {
        self.config.columns.actual = name.into();
        self
    }

    /// Set the predicted column name
    pub fn predicted_column<S: Into<String>>(mut self, name: S) -> Self {
        self.config.columns.predicted = name.into();
        self
    }

    /// Set the count column name
    pub fn count_column<S: Into<String>>(mut self, name: S) -> Self {
        self.config.columns.count = name.into();
        self
    }

    /// Set the ingestion mode
    pub fn ingestion(mut self, mode: IngestionMode) -> Self {
        self.config.ingestion = mode;
        self
    }

    /// Set the multi-label threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        if !(0.0..=1.0).contains(&threshold) {
            self.validation_errors
                .push("threshold must be in range [0.0, 1.0]".to_string());
        }
        self.config.threshold = threshold;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<EvaluationConfig> {
        if !self.validation_errors.is_empty() {
            return Err(MetricsError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for EvaluationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
