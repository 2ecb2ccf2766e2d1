//! Sellability: how well a recommendation list carries over to a user's
//! geographic neighbours.
//!
//! Each neighbour gets an independent recommendation. Every target item is
//! matched with its most similar item in that list; the per-item maxima are
//! averaged per neighbour, then across neighbours.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::config::SellabilityConfig;
use crate::error::Result;
use crate::model::{ItemId, User, UserId};
use crate::recommend::ContentRecommender;
use crate::similarity::{cosine_or_zero, SimilarityIndex};

/// Produces the recommendation list of one neighbour.
///
/// Implemented by [`ContentRecommender`] (with its configured list sizes)
/// and by any `Fn(UserId) -> Result<Vec<ItemId>>` closure, which is how
/// external rating models are plugged in.
pub trait NeighborRecommender: Sync {
    /// Recommendation for `user_id`.
    fn recommend_for(&self, user_id: UserId) -> Result<Vec<ItemId>>;
}

impl<F> NeighborRecommender for F
where
    F: Fn(UserId) -> Result<Vec<ItemId>> + Sync,
{
    fn recommend_for(&self, user_id: UserId) -> Result<Vec<ItemId>> {
        self(user_id)
    }
}

impl<S: SimilarityIndex> NeighborRecommender for ContentRecommender<'_, S> {
    fn recommend_for(&self, user_id: UserId) -> Result<Vec<ItemId>> {
        Ok(self.recommend_default(user_id))
    }
}

/// Scores recommendation lists against neighbour recommendations.
#[derive(Debug, Clone)]
pub struct SellabilityScorer<'a> {
    catalog: &'a Catalog,
    config: SellabilityConfig,
}

impl<'a> SellabilityScorer<'a> {
    /// Creates a scorer comparing items of `catalog`.
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: SellabilityConfig) -> Self {
        Self { catalog, config }
    }

    /// Sellability of `recommendation` (made for `user_id`) among `neighbors`.
    ///
    /// The result lies in `[0, 1]`:
    /// - no neighbour, or every neighbour's recommender failing, yields the
    ///   configured empty-neighbourhood score;
    /// - item ids missing from the catalog are skipped on both sides;
    /// - a target list with no known item scores 0.
    ///
    /// A failing neighbour is logged and left out of the average.
    pub fn score<R>(
        &self,
        user_id: UserId,
        recommendation: &[ItemId],
        neighbors: &[User],
        recommender: &R,
    ) -> f64
    where
        R: NeighborRecommender + ?Sized,
    {
        if neighbors.is_empty() {
            tracing::debug!(user_id, "No neighbour to score against");
            return self.config.empty_neighborhood_score;
        }

        let target = self.vectors(recommendation);
        if target.is_empty() {
            tracing::debug!(user_id, "Empty recommendation scores 0");
            return 0.0;
        }

        let score_neighbor = |neighbor: &User| match recommender.recommend_for(neighbor.id) {
            Ok(items) => Some(best_match_mean(&target, &self.vectors(&items))),
            Err(err) => {
                tracing::warn!(
                    user_id,
                    neighbor = neighbor.id,
                    error = %err,
                    "Neighbour skipped: recommendation failed"
                );
                None
            }
        };

        #[cfg(feature = "parallel")]
        let per_neighbor: Vec<Option<f64>> = neighbors.par_iter().map(score_neighbor).collect();

        #[cfg(not(feature = "parallel"))]
        let per_neighbor: Vec<Option<f64>> = neighbors.iter().map(score_neighbor).collect();

        let scored: Vec<f64> = per_neighbor.into_iter().flatten().collect();
        if scored.is_empty() {
            return self.config.empty_neighborhood_score;
        }

        // Reason: neighbour counts stay far below 2^52
        #[allow(clippy::cast_precision_loss)]
        let score = (scored.iter().sum::<f64>() / scored.len() as f64).clamp(0.0, 1.0);

        tracing::info!(
            user_id,
            neighbors = neighbors.len(),
            scored = scored.len(),
            score,
            "Sellability computed"
        );
        score
    }

    /// Sellability against neighbours' content recommendations of the given sizes.
    pub fn content_sellability<S: SimilarityIndex>(
        &self,
        user_id: UserId,
        recommendation: &[ItemId],
        neighbors: &[User],
        recommender: &ContentRecommender<'_, S>,
        nb_recipes: usize,
        nb_top_tags: usize,
    ) -> f64 {
        let neighbor_recommendation = |neighbor_id: UserId| -> Result<Vec<ItemId>> {
            Ok(recommender.recommend(neighbor_id, nb_recipes, nb_top_tags))
        };
        self.score(user_id, recommendation, neighbors, &neighbor_recommendation)
    }

    fn vectors(&self, items: &[ItemId]) -> Vec<&'a [f32]> {
        let vectors: Vec<&'a [f32]> = items
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .map(|item| item.features.as_slice())
            .collect();
        if vectors.len() < items.len() {
            tracing::warn!(
                skipped = items.len() - vectors.len(),
                "Recommended items missing from the catalog"
            );
        }
        vectors
    }
}

/// Mean over `target` of each vector's best similarity within `candidates`.
// Reason: list lengths stay far below 2^52
#[allow(clippy::cast_precision_loss)]
fn best_match_mean(target: &[&[f32]], candidates: &[&[f32]]) -> f64 {
    let total: f64 = target
        .iter()
        .map(|t| {
            candidates
                .iter()
                .map(|c| cosine_or_zero(t, c))
                .fold(0.0_f64, f64::max)
        })
        .sum();
    total / target.len() as f64
}
