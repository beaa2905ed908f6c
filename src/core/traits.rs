//! Core trait definitions.
//!
//! [`ConfusionReport`] is the capability every matrix variant offers to the
//! report assembler: its label ordering, per-class metrics and a text table.

use crate::core::types::{ClassMetrics, Label, MatrixKind};
use std::fmt::Debug;

/// Read-only reporting surface shared by the binary, multi-class and
/// multi-label matrices.
pub trait ConfusionReport: Debug {
    /// Which regime this report belongs to.
    fn kind(&self) -> MatrixKind;

    /// Labels in the order used for indexing and rendering (sorted ascending).
    fn labels(&self) -> &[Label];

    /// Per-class metrics, ordered like [`ConfusionReport::labels`] except for
    /// the binary matrix, which reports its positive class only.
    fn calculate_metrics(&self) -> Vec<ClassMetrics>;

    /// Deterministic tab-delimited table of raw counts.
    fn render_table(&self) -> String;
}
