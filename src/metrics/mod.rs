//! Confusion matrices and the metrics derived from them.
//!
//! # Examples
//!
//! ## Binary
//!
//! ```rust
//! use classifier_metrics::metrics::{BinaryConfusionMatrix, ObservationSet};
//!
//! let observations = ObservationSet::from_counted([
//!     ("spam", "spam", 80),
//!     ("ham", "spam", 20),
//!     ("spam", "ham", 20),
//!     ("ham", "ham", 80),
//! ]);
//! let matrix = BinaryConfusionMatrix::new(&observations).expect("two labels");
//! assert_eq!(matrix.positive_label(), "spam");
//! assert!((matrix.accuracy() - 0.8).abs() < 1e-9);
//! ```
//!
//! ## Multi-class
//!
//! ```rust
//! use classifier_metrics::{ConfusionReport, metrics::{MultiClassConfusionMatrix, ObservationSet}};
//!
//! let observations = ObservationSet::from_pairs([
//!     ("cat", "cat"), ("dog", "dog"), ("bird", "cat"), ("bird", "bird"),
//! ]);
//! let matrix = MultiClassConfusionMatrix::new(&observations).expect("matching label sets");
//! for m in matrix.calculate_metrics() {
//!     println!("{}: recall={:?}", m.label, m.recall);
//! }
//! println!("{}", matrix.render_table());
//! ```
//!
//! ## Multi-label
//!
//! ```rust
//! use classifier_metrics::{ConfusionReport, MultiLabelObservation, metrics::MultiLabelConfusionMatrix};
//!
//! let observations = vec![
//!     MultiLabelObservation::new(["news", "sports"], ["news"]),
//!     MultiLabelObservation::new(["weather"], ["weather", "news"]),
//! ];
//! let matrix = MultiLabelConfusionMatrix::new(["news", "sports", "weather"], &observations).unwrap();
//! let sports = &matrix.calculate_metrics()[1];
//! assert_eq!(sports.recall, Some(0.0));
//! assert_eq!(sports.precision, None);
//! ```

pub mod binary;
pub mod math;
pub mod multiclass;
pub mod multilabel;
pub mod observations;
pub mod render;
pub mod validation;

pub use binary::BinaryConfusionMatrix;
pub use multiclass::MultiClassConfusionMatrix;
pub use multilabel::MultiLabelConfusionMatrix;
pub use observations::ObservationSet;
pub use render::render_metrics_table;
pub use validation::{validate_label_sets, LabelConstraint};

use crate::core::constants::BINARY_CLASS_COUNT;
use crate::core::traits::ConfusionReport;
use crate::core::types::{ClassMetrics, Label, MatrixKind};
use std::fmt;

/// The closed set of matrix variants behind one reporting interface.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfusionMatrixKind {
    /// Two mutually exclusive classes
    Binary(BinaryConfusionMatrix),
    /// N mutually exclusive classes
    MultiClass(MultiClassConfusionMatrix),
    /// Independent, co-occurring labels
    MultiLabel(MultiLabelConfusionMatrix),
}

impl ConfusionMatrixKind {
    /// Build a single-label matrix, choosing the binary variant when the set
    /// has exactly two actual labels and the multi-class variant otherwise.
    pub fn single_label(observations: &ObservationSet) -> Option<Self> {
        if observations.actual_labels().len() == BINARY_CLASS_COUNT {
            BinaryConfusionMatrix::new(observations).map(ConfusionMatrixKind::Binary)
        } else {
            MultiClassConfusionMatrix::new(observations).map(ConfusionMatrixKind::MultiClass)
        }
    }

    fn report(&self) -> &dyn ConfusionReport {
        match self {
            ConfusionMatrixKind::Binary(m) => m,
            ConfusionMatrixKind::MultiClass(m) => m,
            ConfusionMatrixKind::MultiLabel(m) => m,
        }
    }

    /// Per-class metrics rendered as a table.
    pub fn metrics_table(&self) -> String {
        render_metrics_table(&self.calculate_metrics())
    }
}

impl ConfusionReport for ConfusionMatrixKind {
    fn kind(&self) -> MatrixKind {
        self.report().kind()
    }

    fn labels(&self) -> &[Label] {
        self.report().labels()
    }

    fn calculate_metrics(&self) -> Vec<ClassMetrics> {
        self.report().calculate_metrics()
    }

    fn render_table(&self) -> String {
        self.report().render_table()
    }
}

impl fmt::Display for ConfusionMatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_table())
    }
}

impl From<BinaryConfusionMatrix> for ConfusionMatrixKind {
    fn from(matrix: BinaryConfusionMatrix) -> Self {
        ConfusionMatrixKind::Binary(matrix)
    }
}

impl From<MultiClassConfusionMatrix> for ConfusionMatrixKind {
    fn from(matrix: MultiClassConfusionMatrix) -> Self {
        ConfusionMatrixKind::MultiClass(matrix)
    }
}

impl From<MultiLabelConfusionMatrix> for ConfusionMatrixKind {
    fn from(matrix: MultiLabelConfusionMatrix) -> Self {
        ConfusionMatrixKind::MultiLabel(matrix)
    }
}
