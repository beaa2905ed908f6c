//! Label-set validation shared by every matrix variant.
//!
//! A single routine checks an observation set's actual and predicted label
//! sets against a [`LabelConstraint`] and, on success, returns the sorted
//! label sequence that defines matrix indexing.

use crate::core::constants::BINARY_CLASS_COUNT;
use crate::core::error::ValidationError;
use crate::core::types::Label;
use std::collections::BTreeSet;

/// Cardinality and set-equality rule a matrix variant imposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelConstraint {
    /// Exactly two actual labels; predicted labels must be a subset of them
    ExactlyTwo,
    /// Any number of labels; predicted and actual sets must be identical
    MatchingSets,
    /// No checks at all; the supplied universe is taken as-is
    Unconstrained,
}

/// Validate label sets and return the sorted labels.
///
/// Checks run in order: empty observation set, missing actual role, missing
/// predicted role, then the constraint itself. `observation_count` is the
/// number of ingested rows, not the summed counts.
pub fn validate_label_sets(
    observation_count: usize,
    actual: &BTreeSet<Label>,
    predicted: &BTreeSet<Label>,
    constraint: LabelConstraint,
) -> Result<Vec<Label>, ValidationError> {
    if constraint == LabelConstraint::Unconstrained {
        return Ok(actual.iter().cloned().collect());
    }

    if observation_count == 0 {
        return Err(ValidationError::Empty);
    }
    if actual.is_empty() {
        return Err(ValidationError::MissingRole { role: "actual" });
    }
    if predicted.is_empty() {
        return Err(ValidationError::MissingRole { role: "predicted" });
    }

    match constraint {
        LabelConstraint::ExactlyTwo => {
            if actual.len() != BINARY_CLASS_COUNT {
                return Err(ValidationError::Cardinality {
                    expected: BINARY_CLASS_COUNT,
                    actual: actual.len(),
                });
            }
            let unseen: BTreeSet<Label> = predicted.difference(actual).cloned().collect();
            if !unseen.is_empty() {
                return Err(ValidationError::PredictedNotInActual { labels: unseen });
            }
        }
        LabelConstraint::MatchingSets => {
            if actual != predicted {
                return Err(ValidationError::LabelSetMismatch {
                    missing_in_predicted: actual.difference(predicted).cloned().collect(),
                    unseen_in_actual: predicted.difference(actual).cloned().collect(),
                });
            }
        }
        LabelConstraint::Unconstrained => {}
    }

    // BTreeSet iteration is already ascending
    Ok(actual.iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> BTreeSet<Label> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_rejected_first() {
        let err = validate_label_sets(0, &set(&[]), &set(&[]), LabelConstraint::ExactlyTwo).unwrap_err();
        assert_eq!(err, ValidationError::Empty);
    }

    #[test]
    fn test_missing_roles() {
        let err = validate_label_sets(3, &set(&[]), &set(&["a"]), LabelConstraint::MatchingSets).unwrap_err();
        assert_eq!(err, ValidationError::MissingRole { role: "actual" });

        let err = validate_label_sets(3, &set(&["a"]), &set(&[]), LabelConstraint::MatchingSets).unwrap_err();
        assert_eq!(err, ValidationError::MissingRole { role: "predicted" });
    }

    #[test]
    fn test_exactly_two() {
        let labels = validate_label_sets(4, &set(&["yes", "no"]), &set(&["yes"]), LabelConstraint::ExactlyTwo).unwrap();
        assert_eq!(labels, vec!["no".to_string(), "yes".to_string()]);

        let err = validate_label_sets(4, &set(&["a"]), &set(&["a"]), LabelConstraint::ExactlyTwo).unwrap_err();
        assert_eq!(err, ValidationError::Cardinality { expected: 2, actual: 1 });

        let err = validate_label_sets(4, &set(&["a", "b", "c"]), &set(&["a"]), LabelConstraint::ExactlyTwo).unwrap_err();
        assert_eq!(err, ValidationError::Cardinality { expected: 2, actual: 3 });
    }

    #[test]
    fn test_exactly_two_rejects_unseen_prediction() {
        let err = validate_label_sets(4, &set(&["a", "b"]), &set(&["a", "z"]), LabelConstraint::ExactlyTwo).unwrap_err();
        assert_eq!(err, ValidationError::PredictedNotInActual { labels: set(&["z"]) });
    }

    #[test]
    fn test_matching_sets() {
        let labels = validate_label_sets(
            6,
            &set(&["dog", "cat", "bird"]),
            &set(&["bird", "cat", "dog"]),
            LabelConstraint::MatchingSets,
        )
        .unwrap();
        assert_eq!(labels, vec!["bird", "cat", "dog"]);

        let err = validate_label_sets(6, &set(&["cat", "dog"]), &set(&["bird", "cat", "dog"]), LabelConstraint::MatchingSets)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::LabelSetMismatch {
                missing_in_predicted: set(&[]),
                unseen_in_actual: set(&["bird"]),
            }
        );
    }

    #[test]
    fn test_unconstrained_accepts_anything() {
        let labels = validate_label_sets(0, &set(&["b", "a"]), &set(&[]), LabelConstraint::Unconstrained).unwrap();
        assert_eq!(labels, vec!["a", "b"]);
        assert!(validate_label_sets(0, &set(&[]), &set(&[]), LabelConstraint::Unconstrained).unwrap().is_empty());
    }
}
