//! Recall, precision and F1 from integer counts.
//!
//! Two zero-denominator policies exist. The binary and multi-class matrices
//! fall back to `0.0`. The multi-label matrix reports `None` ("not
//! applicable") when a label has no positives to recover or no predictions
//! to judge, and `None` propagates through F1.
//!
//! Count arithmetic saturates at `u64::MAX` instead of overflowing.

use crate::core::types::Count;

/// `tp / (tp + fn)`, or `0.0` when there were no actual positives.
pub fn recall(tp: Count, fn_: Count) -> f64 {
    ratio(tp, tp.saturating_add(fn_)).unwrap_or(0.0)
}

/// `tp / (tp + fp)`, or `0.0` when nothing was predicted positive.
pub fn precision(tp: Count, fp: Count) -> f64 {
    ratio(tp, tp.saturating_add(fp)).unwrap_or(0.0)
}

/// Harmonic mean of precision and recall, `0.0` when both are zero.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Recall that is undefined when `tp + fn == 0`.
pub fn recall_or_undefined(tp: Count, fn_: Count) -> Option<f64> {
    ratio(tp, tp.saturating_add(fn_))
}

/// Precision that is undefined when `tp + fp == 0`.
pub fn precision_or_undefined(tp: Count, fp: Count) -> Option<f64> {
    ratio(tp, tp.saturating_add(fp))
}

/// F1 that is undefined when either input is.
pub fn f1_or_undefined(precision: Option<f64>, recall: Option<f64>) -> Option<f64> {
    Some(f1(precision?, recall?))
}

/// Sum of counts, saturating at `u64::MAX`.
pub fn saturating_sum<I: IntoIterator<Item = Count>>(counts: I) -> Count {
    counts.into_iter().fold(0, Count::saturating_add)
}

/// `numerator / denominator` as `f64`, `None` on a zero denominator.
pub fn ratio(numerator: Count, denominator: Count) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}
