//! Fuzz target for cosine similarity over vectors of unequal length.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_cosine_similarity
//! ```

#![no_main]

use arbitrary::Arbitrary;
use ladle_core::similarity::{cosine_or_zero, cosine_similarity};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct CosineInput {
    vec_a: Vec<f32>,
    vec_b: Vec<f32>,
}

fuzz_target!(|input: CosineInput| {
    let max_dim = 2048;
    let a: Vec<f32> = input.vec_a.into_iter().take(max_dim).collect();
    let b: Vec<f32> = input.vec_b.into_iter().take(max_dim).collect();

    match cosine_similarity(&a, &b) {
        Ok(similarity) => {
            assert!((-1.0..=1.0).contains(&similarity), "out of range: {similarity}");
        }
        Err(_) => assert_eq!(cosine_or_zero(&a, &b), 0.0),
    }
});
