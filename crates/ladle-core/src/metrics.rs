//! Evaluation metrics for rating models.
//!
//! - **Precision@k** / **Recall@k**: quality of a top-k item list against
//!   the items a user actually ordered in the held-out set
//! - **RMSE** / **MAE**: rating prediction error
//!
//! Empty inputs yield 0.0 rather than an undefined value.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Precision@k: share of the first `k` results that are relevant.
///
/// `precision@k = |relevant ∩ results[..k]| / |results[..k]|`
///
/// Returns 0.0 when no result is considered.
#[must_use]
pub fn precision_at_k<T: Eq + Hash + Copy>(relevant: &[T], results: &[T], k: usize) -> f64 {
    let top = &results[..k.min(results.len())];
    if top.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let precision = hits(relevant, top) as f64 / top.len() as f64;
    precision
}

/// Recall@k: share of relevant items found in the first `k` results.
///
/// `recall@k = |relevant ∩ results[..k]| / |relevant|`
///
/// Returns 0.0 when there is no relevant item.
#[must_use]
pub fn recall_at_k<T: Eq + Hash + Copy>(relevant: &[T], results: &[T], k: usize) -> f64 {
    let truth: FxHashSet<T> = relevant.iter().copied().collect();
    if truth.is_empty() {
        return 0.0;
    }
    let top = &results[..k.min(results.len())];

    #[allow(clippy::cast_precision_loss)]
    let recall = hits(relevant, top) as f64 / truth.len() as f64;
    recall
}

/// Root mean squared error over `(predicted, actual)` pairs.
#[must_use]
pub fn rmse(pairs: &[(f64, f64)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let squared: f64 = pairs.iter().map(|(p, a)| (p - a) * (p - a)).sum();

    #[allow(clippy::cast_precision_loss)]
    let mean = squared / pairs.len() as f64;
    mean.sqrt()
}

/// Mean absolute error over `(predicted, actual)` pairs.
#[must_use]
pub fn mae(pairs: &[(f64, f64)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let absolute: f64 = pairs.iter().map(|(p, a)| (p - a).abs()).sum();

    #[allow(clippy::cast_precision_loss)]
    let mean = absolute / pairs.len() as f64;
    mean
}

/// Distinct relevant items among `results`.
fn hits<T: Eq + Hash + Copy>(relevant: &[T], results: &[T]) -> usize {
    let truth: FxHashSet<T> = relevant.iter().copied().collect();
    let found: FxHashSet<T> = results.iter().copied().filter(|id| truth.contains(id)).collect();
    found.len()
}
