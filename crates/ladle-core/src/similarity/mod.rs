//! Vector similarity primitives and item-item similarity rankings.

mod cosine;
mod matrix;

#[cfg(test)]
mod cosine_tests;
#[cfg(test)]
mod matrix_tests;

pub use cosine::{cosine_or_zero, cosine_similarity};
pub use matrix::{ItemSimilarityMatrix, ScoredItem, SimilarityIndex, SimilarityRanking};
