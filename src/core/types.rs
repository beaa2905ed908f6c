//! Core data types for the classifier metrics engine.
//!
//! Observations are the raw input; [`ClassMetrics`] and [`AverageMetrics`]
//! are derived values that can always be recomputed from a matrix.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque class identifier.
pub type Label = String;

/// Integer cell type of every confusion matrix.
pub type Count = u64;

/// One (actual, predicted) pair for binary and multi-class matrices,
/// carrying a pre-aggregated frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Ground-truth label
    pub actual: Label,
    /// Predicted label
    pub predicted: Label,
    /// Number of times this pair occurred
    pub count: Count,
}

impl Observation {
    /// Create an observation with count 1.
    pub fn new<A: Into<Label>, P: Into<Label>>(actual: A, predicted: P) -> Self {
        Self::with_count(actual, predicted, 1)
    }

    /// Create an observation with an explicit frequency.
    pub fn with_count<A: Into<Label>, P: Into<Label>>(actual: A, predicted: P, count: Count) -> Self {
        Self {
            actual: actual.into(),
            predicted: predicted.into(),
            count,
        }
    }
}

/// One sample in the multi-label regime: the true label set and the
/// already-thresholded predicted label set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLabelObservation {
    /// Labels the sample actually carries
    pub true_labels: BTreeSet<Label>,
    /// Labels the classifier assigned
    pub predicted_labels: BTreeSet<Label>,
}

impl MultiLabelObservation {
    /// Build an observation from any two label collections.
    pub fn new<T, P, S>(true_labels: T, predicted_labels: P) -> Self
    where
        T: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        Self {
            true_labels: true_labels.into_iter().map(Into::into).collect(),
            predicted_labels: predicted_labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// How rows of a tabular source are weighted during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionMode {
    /// Every row counts once
    ByRow,
    /// Each row is weighted by the count column
    ByCount,
}

impl Default for IngestionMode {
    fn default() -> Self {
        IngestionMode::ByCount
    }
}

impl fmt::Display for IngestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestionMode::ByRow => write!(f, "row"),
            IngestionMode::ByCount => write!(f, "count"),
        }
    }
}

impl std::str::FromStr for IngestionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "row" | "by_row" | "rows" => Ok(IngestionMode::ByRow),
            "count" | "by_count" | "counts" => Ok(IngestionMode::ByCount),
            _ => Err(format!("Unknown ingestion mode: {}", s)),
        }
    }
}

/// Which matrix variant produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Fixed 2x2 positive/negative matrix
    Binary,
    /// NxN single-label matrix
    MultiClass,
    /// Independent per-label counters
    MultiLabel,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Binary => write!(f, "binary"),
            MatrixKind::MultiClass => write!(f, "multiclass"),
            MatrixKind::MultiLabel => write!(f, "multilabel"),
        }
    }
}

/// Per-class metrics. `None` means the metric is undefined for this label,
/// which only the multi-label regime produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Class label
    pub label: Label,
    /// Fraction of actual members recovered
    pub recall: Option<f64>,
    /// Fraction of predicted members that were correct
    pub precision: Option<f64>,
    /// Harmonic mean of precision and recall
    pub f1: Option<f64>,
}

impl ClassMetrics {
    /// Metrics with every value defined.
    pub fn defined<S: Into<Label>>(label: S, recall: f64, precision: f64, f1: f64) -> Self {
        Self {
            label: label.into(),
            recall: Some(recall),
            precision: Some(precision),
            f1: Some(f1),
        }
    }
}

/// Aggregate metrics across all labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Averaged recall
    pub recall: Option<f64>,
    /// Averaged precision
    pub precision: Option<f64>,
    /// Averaged F1 score
    pub f1: Option<f64>,
}

/// Raw counters kept for one label of a multi-label matrix.
/// True negatives are not tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    /// Label both true and predicted
    pub true_positives: Count,
    /// Label predicted but not true
    pub false_positives: Count,
    /// Label true but not predicted
    pub false_negatives: Count,
}

impl LabelCounts {
    /// Number of samples that actually carry the label.
    pub fn support(&self) -> Count {
        self.true_positives + self.false_negatives
    }
}
