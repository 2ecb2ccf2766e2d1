//! Cosine similarity over feature vectors of possibly different lengths.

use crate::error::{Error, Result};

/// Cosine similarity of `a` and `b`, in `[-1, 1]`.
///
/// Vectors of unequal length are compared as if the shorter one were
/// zero-padded: trailing entries of the longer vector only add to its own
/// norm, never to the dot product. This is looser than the strict
/// mathematical definition, which would reject the pair.
///
/// Accumulation is done in `f64`.
///
/// # Errors
///
/// Returns [`Error::DegenerateVector`] when either vector has a zero norm
/// (including empty vectors), and [`Error::NonFiniteVector`] when an entry
/// is infinite or NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let common = a.len().min(b.len());
    norm_a += a[common..].iter().map(|x| f64::from(*x).powi(2)).sum::<f64>();
    norm_b += b[common..].iter().map(|y| f64::from(*y).powi(2)).sum::<f64>();

    if !(dot.is_finite() && norm_a.is_finite() && norm_b.is_finite()) {
        return Err(Error::NonFiniteVector);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(Error::DegenerateVector);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Cosine similarity that scores degenerate and non-finite pairs as 0.
///
/// Batch callers (similarity matrix, sellability) use this: items without
/// any feature are expected and must not abort a computation.
#[must_use]
pub fn cosine_or_zero(a: &[f32], b: &[f32]) -> f64 {
    cosine_similarity(a, b).unwrap_or(0.0)
}
