//! Binary confusion matrix.
//!
//! The two labels are sorted ascending and the label that sorts **last** is
//! the positive class. This is fixed, not configurable: a caller whose
//! positive label is `"no"` and negative label is `"yes"` gets the metrics
//! of `"yes"`. Check [`BinaryConfusionMatrix::positive_label`] when in doubt.

use crate::core::constants::{NEGATIVE_INDEX, POSITIVE_INDEX};
use crate::core::error::ValidationError;
use crate::core::traits::ConfusionReport;
use crate::core::types::{ClassMetrics, Count, Label, MatrixKind};
use crate::metrics::math;
use crate::metrics::observations::ObservationSet;
use crate::metrics::render;
use crate::metrics::validation::{validate_label_sets, LabelConstraint};
use ndarray::Array2;
use std::fmt;

#[cfg(feature = "polars")]
use crate::config::ColumnRoles;
#[cfg(feature = "polars")]
use crate::core::types::IngestionMode;
#[cfg(feature = "polars")]
use polars::prelude::DataFrame;

/// Immutable 2x2 matrix indexed `[actual][predicted]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryConfusionMatrix {
    labels: Vec<Label>,
    matrix: Array2<Count>,
}

impl BinaryConfusionMatrix {
    /// Build from a complete observation set, or `None` when the set is
    /// empty, a role is missing, the actual labels are not exactly two, or a
    /// predicted label was never seen as ground truth.
    pub fn new(observations: &ObservationSet) -> Option<Self> {
        match Self::try_new(observations) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                log::warn!("Binary confusion matrix not constructed: {}", e);
                None
            }
        }
    }

    /// Like [`BinaryConfusionMatrix::new`] but reports why construction failed.
    pub fn try_new(observations: &ObservationSet) -> Result<Self, ValidationError> {
        let labels = validate_label_sets(
            observations.len(),
            observations.actual_labels(),
            observations.predicted_labels(),
            LabelConstraint::ExactlyTwo,
        )?;
        let matrix = observations.tabulate(&labels);
        log::debug!(
            "Built binary confusion matrix: negative={}, positive={}, total={}",
            labels[NEGATIVE_INDEX],
            labels[POSITIVE_INDEX],
            math::saturating_sum(matrix.iter().copied())
        );
        Ok(Self { labels, matrix })
    }

    /// Ingest a `DataFrame` and build the matrix; `None` on any failure.
    #[cfg(feature = "polars")]
    pub fn from_dataframe(df: &DataFrame, columns: &ColumnRoles, mode: IngestionMode) -> Option<Self> {
        match ObservationSet::from_dataframe(df, columns, mode) {
            Ok(observations) => Self::new(&observations),
            Err(e) => {
                log::warn!("Binary confusion matrix not constructed: {}", e);
                None
            }
        }
    }

    /// The raw grid.
    pub fn matrix(&self) -> &Array2<Count> {
        &self.matrix
    }

    /// Label at index 1 of the sorted pair.
    pub fn positive_label(&self) -> &str {
        &self.labels[POSITIVE_INDEX]
    }

    /// Label at index 0 of the sorted pair.
    pub fn negative_label(&self) -> &str {
        &self.labels[NEGATIVE_INDEX]
    }

    /// `matrix[1][1]`
    pub fn true_positive(&self) -> Count {
        self.matrix[[POSITIVE_INDEX, POSITIVE_INDEX]]
    }

    /// `matrix[0][1]`
    pub fn false_positive(&self) -> Count {
        self.matrix[[NEGATIVE_INDEX, POSITIVE_INDEX]]
    }

    /// `matrix[1][0]`
    pub fn false_negative(&self) -> Count {
        self.matrix[[POSITIVE_INDEX, NEGATIVE_INDEX]]
    }

    /// `matrix[0][0]`
    pub fn true_negative(&self) -> Count {
        self.matrix[[NEGATIVE_INDEX, NEGATIVE_INDEX]]
    }

    /// Sum of all cells, saturating at `u64::MAX`.
    pub fn total(&self) -> Count {
        math::saturating_sum(self.matrix.iter().copied())
    }

    /// Recall of the positive class.
    pub fn recall(&self) -> f64 {
        math::recall(self.true_positive(), self.false_negative())
    }

    /// Precision of the positive class.
    pub fn precision(&self) -> f64 {
        math::precision(self.true_positive(), self.false_positive())
    }

    /// F1 of the positive class.
    pub fn f1(&self) -> f64 {
        math::f1(self.precision(), self.recall())
    }

    /// `(TP + TN) / total`, `0.0` when every count is zero.
    pub fn accuracy(&self) -> f64 {
        math::ratio(self.true_positive().saturating_add(self.true_negative()), self.total()).unwrap_or(0.0)
    }
}

impl ConfusionReport for BinaryConfusionMatrix {
    fn kind(&self) -> MatrixKind {
        MatrixKind::Binary
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn calculate_metrics(&self) -> Vec<ClassMetrics> {
        vec![ClassMetrics::defined(
            self.positive_label(),
            self.recall(),
            self.precision(),
            self.f1(),
        )]
    }

    fn render_table(&self) -> String {
        render::render_grid(&self.labels, &self.matrix)
    }
}

impl fmt::Display for BinaryConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn counted(tp: Count, fp: Count, fn_: Count, tn: Count) -> ObservationSet {
        ObservationSet::from_counted([
            ("pos", "pos", tp),
            ("neg", "pos", fp),
            ("pos", "neg", fn_),
            ("neg", "neg", tn),
        ])
    }

    #[test]
    fn test_positive_is_last_sorted_label() {
        let matrix = BinaryConfusionMatrix::new(&counted(1, 2, 3, 4)).unwrap();
        assert_eq!(matrix.negative_label(), "neg");
        assert_eq!(matrix.positive_label(), "pos");
        assert_eq!(matrix.true_positive(), 1);
        assert_eq!(matrix.false_positive(), 2);
        assert_eq!(matrix.false_negative(), 3);
        assert_eq!(matrix.true_negative(), 4);
        assert_eq!(matrix.total(), 10);
    }

    #[test]
    fn test_perfect_classifier() {
        let matrix = BinaryConfusionMatrix::new(&counted(100, 0, 0, 100)).unwrap();
        assert_eq!(matrix.recall(), 1.0);
        assert_eq!(matrix.precision(), 1.0);
        assert_eq!(matrix.accuracy(), 1.0);
        assert_eq!(matrix.f1(), 1.0);
    }

    #[test]
    fn test_balanced_confusion() {
        let matrix = BinaryConfusionMatrix::new(&counted(80, 20, 20, 80)).unwrap();
        assert_abs_diff_eq!(matrix.recall(), 0.8, epsilon = 1e-3);
        assert_abs_diff_eq!(matrix.precision(), 0.8, epsilon = 1e-3);
        assert_abs_diff_eq!(matrix.accuracy(), 0.8, epsilon = 1e-3);
        assert_abs_diff_eq!(matrix.f1(), 0.8, epsilon = 1e-3);
    }

    #[test]
    fn test_never_predicts_positive() {
        let set = ObservationSet::from_pairs([("1", "0"), ("0", "0"), ("1", "0")]);
        let matrix = BinaryConfusionMatrix::new(&set).unwrap();
        assert_eq!(matrix.positive_label(), "1");
        assert_eq!(matrix.precision(), 0.0);
        assert_eq!(matrix.recall(), 0.0);
        assert_eq!(matrix.f1(), 0.0);
        assert_abs_diff_eq!(matrix.accuracy(), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_zero_counts() {
        let matrix = BinaryConfusionMatrix::new(&counted(0, 0, 0, 0)).unwrap();
        assert_eq!(matrix.total(), 0);
        assert_eq!(matrix.accuracy(), 0.0);
        assert_eq!(matrix.f1(), 0.0);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let matrix = BinaryConfusionMatrix::new(&counted(u64::MAX, 0, 1, u64::MAX)).unwrap();
        assert_eq!(matrix.total(), u64::MAX);
        assert_eq!(matrix.recall(), 1.0);
        assert_eq!(matrix.accuracy(), 1.0);
    }

    #[test]
    fn test_rejects_wrong_cardinality() {
        let one = ObservationSet::from_pairs([("a", "a"), ("a", "a")]);
        assert!(BinaryConfusionMatrix::new(&one).is_none());

        let three = ObservationSet::from_pairs([("a", "a"), ("b", "b"), ("c", "c")]);
        assert_eq!(
            BinaryConfusionMatrix::try_new(&three).unwrap_err(),
            ValidationError::Cardinality { expected: 2, actual: 3 }
        );
    }

    #[test]
    fn test_rejects_empty_and_unseen_predictions() {
        assert_eq!(
            BinaryConfusionMatrix::try_new(&ObservationSet::default()).unwrap_err(),
            ValidationError::Empty
        );

        let set = ObservationSet::from_pairs([("a", "a"), ("b", "maybe")]);
        assert!(matches!(
            BinaryConfusionMatrix::try_new(&set),
            Err(ValidationError::PredictedNotInActual { .. })
        ));
    }

    #[test]
    fn test_metrics_and_rendering() {
        let matrix = BinaryConfusionMatrix::new(&counted(8, 2, 1, 9)).unwrap();
        let metrics = matrix.calculate_metrics();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "pos");
        assert_eq!(metrics[0].recall, Some(matrix.recall()));

        assert_eq!(matrix.kind(), MatrixKind::Binary);
        assert_eq!(
            matrix.render_table(),
            "actual\\predicted\tneg\tpos\nneg\t9\t2\npos\t1\t8\n"
        );
        assert_eq!(matrix.to_string(), matrix.render_table());
    }
}
