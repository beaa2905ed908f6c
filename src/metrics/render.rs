//! Plain-text tables for logs and report assembly.
//!
//! Every table is tab-delimited with one line per row and a trailing
//! newline. Counts are written as raw integers; ratio formatting beyond a
//! fixed six decimals is left to the report assembler.

use crate::core::constants::{TABLE_DELIMITER, UNDEFINED_METRIC};
use crate::core::types::{ClassMetrics, Count, Label};
use ndarray::Array2;

/// Corner cell of a confusion grid header.
pub const GRID_CORNER: &str = "actual\\predicted";

fn write_row<I, S>(out: &mut String, cells: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(TABLE_DELIMITER);
        }
        out.push_str(cell.as_ref());
        first = false;
    }
    out.push('\n');
}

/// Render a square `[actual][predicted]` grid: a header of predicted labels,
/// then one row per actual label.
pub fn render_grid(labels: &[Label], matrix: &Array2<Count>) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        std::iter::once(GRID_CORNER).chain(labels.iter().map(String::as_str)),
    );
    for (label, row) in labels.iter().zip(matrix.rows()) {
        write_row(
            &mut out,
            std::iter::once(label.clone()).chain(row.iter().map(|c| c.to_string())),
        );
    }
    out
}

/// Render `label, true_positives, support` rows without a header.
pub fn render_label_counts<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, Count, Count)>,
{
    let mut out = String::new();
    for (label, true_positives, support) in rows {
        write_row(&mut out, [label.to_string(), true_positives.to_string(), support.to_string()]);
    }
    out
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => UNDEFINED_METRIC.to_string(),
    }
}

/// Render a per-class metric list as `label, recall, precision, f1` with a
/// header row. Undefined values appear as `n/a`.
pub fn render_metrics_table(metrics: &[ClassMetrics]) -> String {
    let mut out = String::new();
    write_row(&mut out, ["label", "recall", "precision", "f1"]);
    for m in metrics {
        write_row(
            &mut out,
            [
                m.label.clone(),
                format_metric(m.recall),
                format_metric(m.precision),
                format_metric(m.f1),
            ],
        );
    }
    out
}
