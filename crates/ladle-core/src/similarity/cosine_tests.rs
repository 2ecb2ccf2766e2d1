//! Tests for cosine similarity.

use super::cosine::{cosine_or_zero, cosine_similarity};
use crate::error::Error;

#[test]
fn test_identical_vectors() {
    let v = [1.0, 1.0, 0.0, 0.0, 1.0];
    let cos = cosine_similarity(&v, &v).unwrap();
    assert!((cos - 1.0).abs() < 1e-12);
}

#[test]
fn test_orthogonal_binary_vectors_are_exactly_zero() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    assert_eq!(
        cosine_similarity(&[0.0, 1.0, 0.0, 1.0, 1.0], &[1.0, 0.0, 1.0, 0.0, 0.0]).unwrap(),
        0.0
    );
}

#[test]
fn test_half_overlap() {
    let cos = cosine_similarity(&[1.0, 1.0, 0.0], &[1.0, 0.0, 1.0]).unwrap();
    assert!((cos - 0.5).abs() < 1e-12);
}

#[test]
fn test_symmetry() {
    let a = [0.3, -1.2, 4.0, 0.0];
    let b = [2.0, 0.5, -0.25, 1.0];
    assert_eq!(
        cosine_similarity(&a, &b).unwrap(),
        cosine_similarity(&b, &a).unwrap()
    );
}

#[test]
fn test_opposite_vectors() {
    let cos = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
    assert!((cos + 1.0).abs() < 1e-12);
}

#[test]
fn test_unequal_lengths_pad_with_zeros() {
    // The tail of the longer vector only counts towards its own norm.
    assert_eq!(
        cosine_similarity(&[0.0, 1.0, 1.0, 1.0, 0.0], &[1.0, 0.0]).unwrap(),
        0.0
    );

    // [1, 1] vs [1, 0, 1]: dot 1, norms sqrt(2) and sqrt(2)
    let cos = cosine_similarity(&[1.0, 1.0], &[1.0, 0.0, 1.0]).unwrap();
    assert!((cos - 0.5).abs() < 1e-12);

    // Differs from the strict definition: a padded prefix match is not 1.
    let cos = cosine_similarity(&[1.0], &[1.0, 1.0]).unwrap();
    assert!((cos - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

#[test]
fn test_zero_vector_is_degenerate() {
    assert!(matches!(
        cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]),
        Err(Error::DegenerateVector)
    ));
    assert!(matches!(
        cosine_similarity(&[1.0, 0.0], &[0.0, 0.0, 0.0]),
        Err(Error::DegenerateVector)
    ));
    assert!(matches!(
        cosine_similarity(&[], &[]),
        Err(Error::DegenerateVector)
    ));
}

#[test]
fn test_cosine_or_zero_substitutes_degenerate() {
    assert_eq!(cosine_or_zero(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    assert!((cosine_or_zero(&[1.0, 1.0], &[1.0, 1.0]) - 1.0).abs() < 1e-12);
}

#[test]
fn test_non_finite_entries_are_rejected() {
    let ones = [1.0, 1.0];
    for bad in [
        [f32::INFINITY, 1.0],
        [f32::NEG_INFINITY, 1.0],
        [f32::NAN, 1.0],
    ] {
        assert!(matches!(
            cosine_similarity(&bad, &ones),
            Err(Error::NonFiniteVector)
        ));
        assert!(matches!(
            cosine_similarity(&ones, &bad),
            Err(Error::NonFiniteVector)
        ));
        assert_eq!(cosine_or_zero(&bad, &ones), 0.0);
    }
    // Trailing entry past the shorter vector only reaches the norm.
    assert!(matches!(
        cosine_similarity(&[1.0], &[1.0, f32::NAN]),
        Err(Error::NonFiniteVector)
    ));
}
