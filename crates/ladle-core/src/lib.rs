//! # Ladle Core
//!
//! Content-based recipe recommendation with a geospatial sellability score.
//!
//! ## Features
//!
//! - **Item similarity**: all-pairs cosine rankings over tag/ingredient vectors
//! - **Preference profiles**: mean-centred ratings and per-tag weights
//! - **Content recommendation**: similar items of a user's best-liked tagged orders
//! - **Sellability**: how well a recommendation carries over to nearby users
//! - **Collaborative evaluation**: split, fit and score external rating models
//!
//! ## Quick Start
//!
//! ```rust
//! use ladle_core::{content_report, Dataset, DatasetSnapshot, ItemRecord, LadleConfig, Order, User};
//!
//! fn main() -> ladle_core::Result<()> {
//!     let recipe = |id: u64, tag: &str| ItemRecord {
//!         id,
//!         title: format!("Recipe {id}"),
//!         tags: vec![tag.to_string()],
//!         ingredients: vec!["tomato".to_string()],
//!     };
//!     let dataset = Dataset::from_snapshot(DatasetSnapshot {
//!         users: vec![User::new(1, 52.2109, 6.8832)?, User::new(2, 52.2169, 6.8811)?],
//!         orders: vec![Order::new(1, 10, 5)?, Order::new(1, 11, 2)?, Order::new(2, 11, 4)?],
//!         items: vec![recipe(10, "italian"), recipe(11, "indian"), recipe(12, "italian")],
//!     })?;
//!
//!     let report = content_report(&dataset, 1, &LadleConfig::default())?;
//!     assert!(report.recommendation.len() <= 10);
//!     assert!((0.0..=1.0).contains(&report.sellability));
//!     println!("{}", report.to_json()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_lossless
    )
)]

pub mod catalog;
pub mod collaborative;
#[cfg(test)]
mod collaborative_tests;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod metrics;
pub mod model;
#[cfg(test)]
mod model_tests;
pub mod pipeline;
pub mod profile;
pub mod recommend;
pub mod sellability;
pub mod similarity;

pub use catalog::{
    Catalog, FeatureFamily, FeatureProjection, FeatureVocabulary, Item, ItemRecord, TableRow,
};
pub use collaborative::{
    evaluate_model, split_orders, ModelFactory, ModelScores, ModelSpec, OrderSplit, RatingModel,
};
pub use config::{
    CollaborativeConfig, ConfigError, LadleConfig, NeighborhoodConfig, RecommendConfig,
    SellabilityConfig, SimilarityConfig,
};
pub use dataset::{Dataset, DatasetSnapshot};
pub use error::{Error, Result};
pub use geo::{
    bounding_box, distance_km, users_within_distance, users_within_radius, BoundingBox,
    Geolocation, EARTH_RADIUS_KM,
};
pub use metrics::{mae, precision_at_k, recall_at_k, rmse};
pub use model::{ItemId, Order, Rating, User, UserId};
pub use pipeline::{collaborative_reports, content_report, neighbors_of, RecommendationReport};
pub use profile::{TagWeight, TagWeights, UserProfile};
pub use recommend::ContentRecommender;
pub use sellability::{NeighborRecommender, SellabilityScorer};
pub use similarity::{
    cosine_similarity, ItemSimilarityMatrix, ScoredItem, SimilarityIndex, SimilarityRanking,
};
