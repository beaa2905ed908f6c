//! Multi-class (single-label) confusion matrix.
//!
//! Per-class metrics are one-vs-rest: for label `i`, true positives are the
//! diagonal cell, false positives the rest of column `i`, and false
//! negatives the rest of row `i`. Zero denominators fall back to `0.0`.

use crate::core::error::ValidationError;
use crate::core::traits::ConfusionReport;
use crate::core::types::{AverageMetrics, ClassMetrics, Count, Label, MatrixKind};
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

/// Immutable NxN matrix indexed `[actual][predicted]` over sorted labels.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiClassConfusionMatrix {
    labels: Vec<Label>,
    matrix: Array2<Count>,
}

impl MultiClassConfusionMatrix {
    /// Build from a complete observation set, or `None` when the set is
    /// empty, a role is missing, or the predicted label set differs from the
    /// actual label set.
    pub fn new(observations: &ObservationSet) -> Option<Self> {
        match Self::try_new(observations) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                log::warn!("Multi-class confusion matrix not constructed: {}", e);
                None
            }
        }
    }

    /// Like [`MultiClassConfusionMatrix::new`] but reports why construction failed.
    pub fn try_new(observations: &ObservationSet) -> Result<Self, ValidationError> {
        let labels = validate_label_sets(
            observations.len(),
            observations.actual_labels(),
            observations.predicted_labels(),
            LabelConstraint::MatchingSets,
        )?;
        let matrix = observations.tabulate(&labels);
        log::debug!(
            "Built multi-class confusion matrix: {} labels, total={}",
            labels.len(),
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
                log::warn!("Multi-class confusion matrix not constructed: {}", e);
                None
            }
        }
    }

    /// The raw grid.
    pub fn matrix(&self) -> &Array2<Count> {
        &self.matrix
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Index of `label` in the sorted label sequence.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Cell count for an (actual, predicted) label pair.
    pub fn get(&self, actual: &str, predicted: &str) -> Option<Count> {
        Some(self.matrix[[self.index_of(actual)?, self.index_of(predicted)?]])
    }

    /// Sum of all cells, saturating at `u64::MAX`.
    pub fn total(&self) -> Count {
        math::saturating_sum(self.matrix.iter().copied())
    }

    fn tp_at(&self, i: usize) -> Count {
        self.matrix[[i, i]]
    }

    fn fp_at(&self, i: usize) -> Count {
        math::saturating_sum(self.matrix.column(i).iter().copied()) - self.tp_at(i)
    }

    fn fn_at(&self, i: usize) -> Count {
        math::saturating_sum(self.matrix.row(i).iter().copied()) - self.tp_at(i)
    }

    /// Diagonal cell of `label`.
    pub fn true_positives(&self, label: &str) -> Option<Count> {
        self.index_of(label).map(|i| self.tp_at(i))
    }

    /// Column sum of `label` minus its diagonal.
    pub fn false_positives(&self, label: &str) -> Option<Count> {
        self.index_of(label).map(|i| self.fp_at(i))
    }

    /// Row sum of `label` minus its diagonal.
    pub fn false_negatives(&self, label: &str) -> Option<Count> {
        self.index_of(label).map(|i| self.fn_at(i))
    }

    /// Number of observations whose actual label is `label`.
    pub fn support(&self, label: &str) -> Option<Count> {
        self.index_of(label)
            .map(|i| math::saturating_sum(self.matrix.row(i).iter().copied()))
    }

    /// Trace over total, `0.0` for an all-zero matrix.
    pub fn accuracy(&self) -> f64 {
        math::ratio(math::saturating_sum(self.matrix.diag().iter().copied()), self.total()).unwrap_or(0.0)
    }

    /// Unweighted mean of the per-class metrics.
    pub fn macro_average(&self) -> AverageMetrics {
        let metrics = self.calculate_metrics();
        let n = metrics.len() as f64;
        let mean = |get: fn(&ClassMetrics) -> Option<f64>| -> f64 {
            metrics.iter().filter_map(get).sum::<f64>() / n
        };
        AverageMetrics {
            recall: Some(mean(|m| m.recall)),
            precision: Some(mean(|m| m.precision)),
            f1: Some(mean(|m| m.f1)),
        }
    }
}

impl ConfusionReport for MultiClassConfusionMatrix {
    fn kind(&self) -> MatrixKind {
        MatrixKind::MultiClass
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn calculate_metrics(&self) -> Vec<ClassMetrics> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let tp = self.tp_at(i);
                let recall = math::recall(tp, self.fn_at(i));
                let precision = math::precision(tp, self.fp_at(i));
                ClassMetrics::defined(label.as_str(), recall, precision, math::f1(precision, recall))
            })
            .collect()
    }

    fn render_table(&self) -> String {
        render::render_grid(&self.labels, &self.matrix)
    }
}

impl fmt::Display for MultiClassConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ANIMALS: [&str; 3] = ["bird", "cat", "dog"];

    fn from_grid(grid: [[Count; 3]; 3]) -> MultiClassConfusionMatrix {
        let mut triples = Vec::new();
        for (i, row) in grid.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                triples.push((ANIMALS[i], ANIMALS[j], count));
            }
        }
        MultiClassConfusionMatrix::new(&ObservationSet::from_counted(triples)).unwrap()
    }

    #[test]
    fn test_diagonal_heavy() {
        let matrix = from_grid([[80, 10, 10], [10, 80, 10], [10, 10, 80]]);
        assert_eq!(matrix.labels(), &["bird", "cat", "dog"]);
        assert_eq!(matrix.total(), 300);

        let metrics = matrix.calculate_metrics();
        assert_eq!(metrics.len(), 3);
        for m in &metrics {
            assert_abs_diff_eq!(m.recall.unwrap(), 0.8, epsilon = 1e-3);
            assert_abs_diff_eq!(m.precision.unwrap(), 0.8, epsilon = 1e-3);
            assert_abs_diff_eq!(m.f1.unwrap(), 0.8, epsilon = 1e-3);
        }
        assert_abs_diff_eq!(matrix.accuracy(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_all_zero_matrix_falls_back_to_zero() {
        let matrix = from_grid([[0; 3]; 3]);
        for m in matrix.calculate_metrics() {
            assert_eq!(m.recall, Some(0.0));
            assert_eq!(m.precision, Some(0.0));
            assert_eq!(m.f1, Some(0.0));
        }
        assert_eq!(matrix.accuracy(), 0.0);
    }

    #[test]
    fn test_one_vs_rest_counts() {
        let matrix = from_grid([[5, 1, 0], [2, 7, 3], [0, 4, 9]]);
        assert_eq!(matrix.true_positives("cat"), Some(7));
        assert_eq!(matrix.false_positives("cat"), Some(5));
        assert_eq!(matrix.false_negatives("cat"), Some(5));
        assert_eq!(matrix.support("dog"), Some(13));
        assert_eq!(matrix.get("dog", "cat"), Some(4));
        assert_eq!(matrix.get("fish", "cat"), None);
        assert_eq!(matrix.true_positives("fish"), None);
    }

    #[test]
    fn test_rejects_extra_predicted_label() {
        let set = ObservationSet::from_pairs([("cat", "cat"), ("dog", "dog"), ("dog", "bird")]);
        assert!(MultiClassConfusionMatrix::new(&set).is_none());
        assert!(matches!(
            MultiClassConfusionMatrix::try_new(&set),
            Err(ValidationError::LabelSetMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_never_predicted_label() {
        let set = ObservationSet::from_pairs([("cat", "cat"), ("dog", "cat")]);
        assert!(MultiClassConfusionMatrix::new(&set).is_none());
    }

    #[test]
    fn test_macro_average() {
        let matrix = from_grid([[10, 0, 0], [0, 10, 0], [0, 10, 0]]);
        let avg = matrix.macro_average();
        // bird 1/1, cat recall 1 precision 0.5, dog recall 0/10 precision 0/0
        assert_abs_diff_eq!(avg.recall.unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(avg.precision.unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let set = ObservationSet::from_counted([("a", "a", u64::MAX), ("a", "b", 1), ("b", "b", 0)]);
        let matrix = MultiClassConfusionMatrix::new(&set).unwrap();
        assert_eq!(matrix.get("a", "a"), Some(u64::MAX));
        assert_eq!(matrix.total(), u64::MAX);
        assert_eq!(matrix.support("a"), Some(u64::MAX));
        assert_eq!(matrix.false_negatives("a"), Some(0));
        assert_eq!(matrix.accuracy(), 1.0);
        for m in matrix.calculate_metrics() {
            assert!((0.0..=1.0).contains(&m.recall.unwrap()));
        }
    }

    #[test]
    fn test_metrics_are_idempotent() {
        let matrix = from_grid([[3, 1, 2], [0, 4, 1], [2, 2, 5]]);
        assert_eq!(matrix.calculate_metrics(), matrix.calculate_metrics());
    }

    #[test]
    fn test_render_table() {
        let matrix = from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let expected = "actual\\predicted\tbird\tcat\tdog\n\
                        bird\t1\t2\t3\n\
                        cat\t4\t5\t6\n\
                        dog\t7\t8\t9\n";
        assert_eq!(matrix.render_table(), expected);
        assert_eq!(format!("{}", matrix), expected);
    }
}
