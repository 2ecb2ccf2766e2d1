//! Error types for ladle-core.
//!
//! Missing ids and empty aggregates are not errors here: lookups that miss
//! return empty results and undefined means are omitted from their maps.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::{ItemId, UserId};

/// Errors raised by ladle-core.
#[derive(Error, Debug)]
pub enum Error {
    /// Cosine similarity of an all-zero vector.
    #[error("Degenerate vector: cosine similarity is undefined for an all-zero vector")]
    DegenerateVector,

    /// Cosine similarity of a vector holding an infinite or NaN entry.
    #[error("Non-finite vector: cosine similarity is undefined for infinite or NaN entries")]
    NonFiniteVector,

    /// Rating outside the accepted scale.
    #[error("Invalid rating {0}: ratings range from 1 to 5")]
    InvalidRating(u8),

    /// Latitude/longitude outside WGS84 bounds or not finite.
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },

    /// Item feature row does not match the vocabulary width.
    #[error("Item {item_id} has {actual} feature values, expected {expected}")]
    DimensionMismatch {
        /// Offending item.
        item_id: ItemId,
        /// Vocabulary width.
        expected: usize,
        /// Row width.
        actual: usize,
    },

    /// Item id present twice in a catalog.
    #[error("Duplicate item id {0}")]
    DuplicateItem(ItemId),

    /// User id present twice in a dataset.
    #[error("Duplicate user id {0}")]
    DuplicateUser(UserId),

    /// Failure reported by an external rating model.
    #[error("Model '{model}' failed: {message}")]
    Model {
        /// Model name.
        model: String,
        /// Reason given by the model.
        message: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Builds a [`Error::Model`] from a model name and a message.
    #[must_use]
    pub fn model(model: &str, message: impl Into<String>) -> Self {
        Self::Model {
            model: model.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for ladle-core operations.
pub type Result<T> = std::result::Result<T, Error>;
