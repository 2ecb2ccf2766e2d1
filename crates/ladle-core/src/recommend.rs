//! Content-based recommendation.
//!
//! A user's strongest tag preferences select seed orders from their own
//! history; the items most similar to those seeds form the recommendation.

use crate::config::RecommendConfig;
use crate::dataset::Dataset;
use crate::model::{ItemId, UserId};
use crate::profile::UserProfile;
use crate::similarity::{ItemSimilarityMatrix, SimilarityIndex};

/// Recommends items from a user's own preferred orders.
///
/// Holds borrowed, read-only state only; one recommender can serve any
/// number of users, including from several threads.
#[derive(Debug, Clone)]
pub struct ContentRecommender<'a, S: SimilarityIndex = ItemSimilarityMatrix> {
    dataset: &'a Dataset,
    index: &'a S,
    config: RecommendConfig,
}

impl<'a, S: SimilarityIndex> ContentRecommender<'a, S> {
    /// Creates a recommender over `dataset` using the similarity rankings of `index`.
    #[must_use]
    pub fn new(dataset: &'a Dataset, index: &'a S, config: RecommendConfig) -> Self {
        Self {
            dataset,
            index,
            config,
        }
    }

    /// Recommendation parameters.
    #[must_use]
    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// The dataset recommendations are drawn from.
    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Profile of `user_id` under the configured projection.
    #[must_use]
    pub fn profile(&self, user_id: UserId) -> UserProfile {
        let catalog = self.dataset.catalog();
        UserProfile::build(
            user_id,
            self.dataset.orders_of(user_id),
            catalog,
            self.config.projection,
        )
    }

    /// Recommends with the configured `nb_recipes` and `nb_top_tags`.
    #[must_use]
    pub fn recommend_default(&self, user_id: UserId) -> Vec<ItemId> {
        self.recommend(user_id, self.config.nb_recipes, self.config.nb_top_tags)
    }

    /// Recommends at most `nb_recipes` items to `user_id`.
    ///
    /// Seed orders are the user's orders whose item carries any of the
    /// `nb_top_tags` highest-weighted features, highest rating first (ties
    /// keep history order). Each seed contributes its `similar_per_order`
    /// most similar items; the lists are concatenated as is, so an item
    /// similar to several seeds may appear more than once. A user without
    /// orders gets an empty list.
    #[must_use]
    pub fn recommend(&self, user_id: UserId, nb_recipes: usize, nb_top_tags: usize) -> Vec<ItemId> {
        if nb_recipes == 0 {
            return Vec::new();
        }

        let catalog = self.dataset.catalog();
        let profile = self.profile(user_id);
        let weights = profile.tag_weights(catalog);
        let offsets: Vec<usize> = weights
            .top(nb_top_tags)
            .iter()
            .map(|tag| tag.column - profile.columns.start)
            .collect();

        let mut seeds: Vec<_> = profile
            .rows
            .iter()
            .filter(|row| offsets.iter().any(|&offset| row.has_feature(offset)))
            .collect();
        seeds.sort_by(|a, b| b.rating.cmp(&a.rating));

        let mut recommendation = Vec::with_capacity(nb_recipes);
        for seed in &seeds {
            if recommendation.len() >= nb_recipes {
                break;
            }
            recommendation.extend(
                self.index
                    .most_similar(seed.item_id, self.config.similar_per_order),
            );
        }
        recommendation.truncate(nb_recipes);

        tracing::debug!(
            user_id,
            orders = profile.len(),
            weighted_tags = weights.len(),
            seeds = seeds.len(),
            recommended = recommendation.len(),
            "Content recommendation computed"
        );

        recommendation
    }
}
