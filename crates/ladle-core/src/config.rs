//! Engine configuration.
//!
//! Values are layered with figment: built-in defaults, then an optional
//! `ladle.toml`, then `LADLE_` environment variables (`__` separates
//! sections, e.g. `LADLE_RECOMMEND__NB_RECIPES=20`).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::FeatureProjection;
use crate::collaborative::ModelSpec;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "ladle.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LADLE_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Figment could not read or extract the configuration.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Content recommendation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum length of a recommendation list.
    pub nb_recipes: usize,
    /// Number of preferred tags used to select seed orders.
    pub nb_top_tags: usize,
    /// Similar items taken from each seed order's ranking.
    pub similar_per_order: usize,
    /// Feature families carried by user profiles.
    pub projection: FeatureProjection,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            nb_recipes: 10,
            nb_top_tags: 3,
            similar_per_order: 3,
            projection: FeatureProjection::Tags,
        }
    }
}

/// Similarity matrix parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Cap on stored neighbours per item; `None` keeps full rankings.
    pub max_neighbors: Option<usize>,
}

/// Neighbourhood lookup parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodConfig {
    /// Search radius in kilometres.
    pub radius_km: f64,
    /// Whether the target user counts as their own neighbour.
    pub include_target: bool,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            radius_km: 5.0,
            include_target: true,
        }
    }
}

/// Sellability scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellabilityConfig {
    /// Score returned when there is no neighbour to compare against.
    pub empty_neighborhood_score: f64,
}

impl Default for SellabilityConfig {
    fn default() -> Self {
        Self {
            empty_neighborhood_score: 1.0,
        }
    }
}

/// External collaborative-filtering evaluation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaborativeConfig {
    /// Share of neighbour orders held out for evaluation.
    pub test_ratio: f64,
    /// Seed of the train/test shuffle.
    pub seed: u64,
    /// Models to fit, built by the caller's model factory.
    pub models: Vec<ModelSpec>,
}

impl Default for CollaborativeConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            models: Vec::new(),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadleConfig {
    /// Content recommendation.
    pub recommend: RecommendConfig,
    /// Similarity matrix.
    pub similarity: SimilarityConfig,
    /// Neighbourhood lookup.
    pub neighborhood: NeighborhoodConfig,
    /// Sellability scoring.
    pub sellability: SellabilityConfig,
    /// Collaborative filtering evaluation.
    pub collaborative: CollaborativeConfig,
}

impl LadleConfig {
    /// Loads defaults, `ladle.toml` from the working directory if present,
    /// then `LADLE_` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Like [`load`](Self::load) with an explicit TOML file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Parses a TOML document layered over the defaults (no environment).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(content));
        Self::extract(&figment)
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recommend.nb_top_tags == 0 {
            return Err(ConfigError::Invalid(
                "recommend.nb_top_tags must be at least 1".to_string(),
            ));
        }
        if self.recommend.similar_per_order == 0 {
            return Err(ConfigError::Invalid(
                "recommend.similar_per_order must be at least 1".to_string(),
            ));
        }
        let radius = self.neighborhood.radius_km;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "neighborhood.radius_km must be a non-negative distance, got {radius}"
            )));
        }
        let empty = self.sellability.empty_neighborhood_score;
        if !(0.0..=1.0).contains(&empty) {
            return Err(ConfigError::Invalid(format!(
                "sellability.empty_neighborhood_score must be within [0, 1], got {empty}"
            )));
        }
        let ratio = self.collaborative.test_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "collaborative.test_ratio must be within (0, 1), got {ratio}"
            )));
        }
        Ok(())
    }
}
