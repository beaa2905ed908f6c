//! Multi-label confusion counters.
//!
//! A sample may carry any number of labels, so there is no shared matrix.
//! Each label of a fixed universe keeps its own TP/FP/FN counters, and its
//! metrics are undefined rather than zero when the label had nothing to
//! recover or nothing was predicted.

use crate::core::constants::DEFAULT_THRESHOLD;
use crate::core::traits::ConfusionReport;
use crate::core::types::{AverageMetrics, ClassMetrics, Label, LabelCounts, MatrixKind, MultiLabelObservation};
use crate::metrics::math;
use crate::metrics::render;
use crate::metrics::validation::{validate_label_sets, LabelConstraint};
use std::collections::BTreeSet;
use std::fmt;

/// Immutable per-label counters over a sorted label universe.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelConfusionMatrix {
    labels: Vec<Label>,
    counts: Vec<LabelCounts>,
    threshold: f64,
    observation_count: usize,
}

impl MultiLabelConfusionMatrix {
    /// Count every observation against the label universe using the default
    /// threshold.
    ///
    /// Every input is accepted, including an empty universe or no
    /// observations; the `Option` return matches the other matrix variants.
    pub fn new<I, S>(labels: I, observations: &[MultiLabelObservation]) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        Self::with_threshold(labels, observations, DEFAULT_THRESHOLD)
    }

    /// Like [`MultiLabelConfusionMatrix::new`], recording the threshold the
    /// caller used to binarize confidences into predicted label sets.
    pub fn with_threshold<I, S>(labels: I, observations: &[MultiLabelObservation], threshold: f64) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        let universe: BTreeSet<Label> = labels.into_iter().map(Into::into).collect();
        // Unconstrained validation only sorts the universe and cannot fail.
        let labels = validate_label_sets(
            observations.len(),
            &universe,
            &universe,
            LabelConstraint::Unconstrained,
        )
        .ok()?;

        let mut counts = vec![LabelCounts::default(); labels.len()];
        for observation in observations {
            for (label, entry) in labels.iter().zip(counts.iter_mut()) {
                let actual = observation.true_labels.contains(label);
                let predicted = observation.predicted_labels.contains(label);
                match (actual, predicted) {
                    (true, true) => entry.true_positives += 1,
                    (false, true) => entry.false_positives += 1,
                    (true, false) => entry.false_negatives += 1,
                    (false, false) => {}
                }
            }
        }

        log::debug!(
            "Built multi-label confusion counters: {} labels, {} observations, threshold {}",
            labels.len(),
            observations.len(),
            threshold
        );
        Some(Self {
            labels,
            counts,
            threshold,
            observation_count: observations.len(),
        })
    }

    /// Counters for `label`, if it is part of the universe.
    pub fn counts(&self, label: &str) -> Option<LabelCounts> {
        self.labels
            .binary_search_by(|l| l.as_str().cmp(label))
            .ok()
            .map(|i| self.counts[i])
    }

    /// Threshold supplied at construction.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of samples counted.
    pub fn observation_count(&self) -> usize {
        self.observation_count
    }

    /// Metrics over TP/FP/FN summed across all labels.
    pub fn micro_average(&self) -> AverageMetrics {
        let total = self.counts.iter().fold(LabelCounts::default(), |acc, c| LabelCounts {
            true_positives: acc.true_positives.saturating_add(c.true_positives),
            false_positives: acc.false_positives.saturating_add(c.false_positives),
            false_negatives: acc.false_negatives.saturating_add(c.false_negatives),
        });
        let metrics = metrics_for("", &total);
        AverageMetrics {
            recall: metrics.recall,
            precision: metrics.precision,
            f1: metrics.f1,
        }
    }
}

fn metrics_for(label: &str, counts: &LabelCounts) -> ClassMetrics {
    let recall = math::recall_or_undefined(counts.true_positives, counts.false_negatives);
    let precision = math::precision_or_undefined(counts.true_positives, counts.false_positives);
    ClassMetrics {
        label: label.to_string(),
        recall,
        precision,
        f1: math::f1_or_undefined(precision, recall),
    }
}

impl ConfusionReport for MultiLabelConfusionMatrix {
    fn kind(&self) -> MatrixKind {
        MatrixKind::MultiLabel
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn calculate_metrics(&self) -> Vec<ClassMetrics> {
        self.labels
            .iter()
            .zip(&self.counts)
            .map(|(label, counts)| metrics_for(label, counts))
            .collect()
    }

    fn render_table(&self) -> String {
        render::render_label_counts(
            self.labels
                .iter()
                .zip(&self.counts)
                .map(|(label, c)| (label.as_str(), c.true_positives, c.support())),
        )
    }
}

impl fmt::Display for MultiLabelConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_table())
    }
}
