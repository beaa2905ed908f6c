//! System constants and default configuration values.
//!
//! The index constants encode the binary positive/negative convention: labels
//! are sorted ascending and the label that sorts last is the positive class.

/// Default prediction-confidence threshold for multi-label classification.
/// Stored and reported only; binarization happens upstream.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Name of the pre-aggregated frequency column in count-based ingestion.
pub const COUNT_COLUMN: &str = "Count";

/// Default name of the ground-truth label column.
pub const DEFAULT_ACTUAL_COLUMN: &str = "actual";

/// Default name of the predicted label column.
pub const DEFAULT_PREDICTED_COLUMN: &str = "predicted";

/// Number of distinct labels a binary confusion matrix requires.
pub const BINARY_CLASS_COUNT: usize = 2;

/// Sorted-label index of the negative class in a binary matrix.
pub const NEGATIVE_INDEX: usize = 0;

/// Sorted-label index of the positive class in a binary matrix.
pub const POSITIVE_INDEX: usize = 1;

/// Cell delimiter used by every rendered table.
pub const TABLE_DELIMITER: char = '\t';

/// Placeholder rendered for an undefined metric value.
pub const UNDEFINED_METRIC: &str = "n/a";

/// Library version
pub const CLASSIFIER_METRICS_VERSION: &str = env!("CARGO_PKG_VERSION");
