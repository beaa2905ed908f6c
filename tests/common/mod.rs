//! Common test utilities for classifier metrics integration tests.

#![allow(dead_code)]

use classifier_metrics::*;
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Animal labels used by the multi-class scenarios
pub const ANIMALS: [&str; 3] = ["bird", "cat", "dog"];

/// Build a counted observation set from a square grid indexed `[actual][predicted]`
pub fn counted_grid<const N: usize>(labels: [&str; N], grid: [[Count; N]; N]) -> ObservationSet {
    let mut triples = Vec::with_capacity(N * N);
    for (i, row) in grid.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            triples.push((labels[i], labels[j], count));
        }
    }
    ObservationSet::from_counted(triples)
}

/// Create random (actual, predicted) pairs over `num_classes` labels.
///
/// The first `num_classes` pairs are on the diagonal so both roles see every label.
pub fn create_random_pairs(num_samples: usize, num_classes: usize, seed: u64) -> Vec<(String, String)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let label = |i: usize| format!("class_{:02}", i);

    let mut pairs: Vec<(String, String)> = (0..num_classes).map(|i| (label(i), label(i))).collect();
    for _ in 0..num_samples {
        let actual = rng.gen_range(0..num_classes);
        // Bias toward the correct class
        let predicted = if rng.gen_bool(0.7) {
            actual
        } else {
            rng.gen_range(0..num_classes)
        };
        pairs.push((label(actual), label(predicted)));
    }
    pairs
}

/// Create random multi-label observations over `labels`
pub fn create_random_multilabel(num_samples: usize, labels: &[&str], seed: u64) -> Vec<MultiLabelObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| {
            let truth: Vec<&str> = labels.iter().copied().filter(|_| rng.gen_bool(0.4)).collect();
            let predicted: Vec<&str> = labels.iter().copied().filter(|_| rng.gen_bool(0.4)).collect();
            MultiLabelObservation::new(truth, predicted)
        })
        .collect()
}

/// Write a CSV fixture and return its path
pub fn create_test_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test CSV");
    path
}

/// Assert that a metric lies in the closed unit interval
pub fn assert_unit_interval(value: f64, context: &str) {
    assert!(
        (0.0..=1.0).contains(&value),
        "{} = {} not in [0, 1]",
        context,
        value
    );
}
