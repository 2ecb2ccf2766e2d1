//! End-to-end recommendation runs for one user.
//!
//! [`content_report`] recommends from content similarity; [`collaborative_reports`]
//! fits every configured external model on the neighbourhood's orders. Both
//! score their recommendation's sellability among the user's neighbours.

use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::collaborative::{
    evaluate_model, split_orders, ModelFactory, ModelSpec, OrderSplit, RatingModel,
};
use crate::config::LadleConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::geo::users_within_radius;
use crate::model::{ItemId, Order, User, UserId};
use crate::recommend::ContentRecommender;
use crate::sellability::SellabilityScorer;
use crate::similarity::ItemSimilarityMatrix;

/// Model name of content-based reports.
pub const CONTENT_MODEL: &str = "content_filtering";

/// Outcome of one recommendation run.
///
/// Content-based runs have no held-out evaluation: their precision, recall,
/// RMSE and MAE are reported as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Model that produced the recommendation.
    pub model: String,
    /// Precision@k on held-out neighbour orders.
    pub precision: f64,
    /// Recall@k on held-out neighbour orders.
    pub recall: f64,
    /// Rating RMSE on held-out neighbour orders.
    pub rmse: f64,
    /// Rating MAE on held-out neighbour orders.
    pub mae: f64,
    /// Sellability among the neighbours.
    pub sellability: f64,
    /// Number of neighbours scored against.
    pub neighbors: usize,
    /// Recommended item ids, best first.
    pub recommendation: Vec<ItemId>,
}

impl RecommendationReport {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Users in the bounding box of `config.neighborhood.radius_km` around `user_id`.
///
/// Unknown users have no neighbours.
#[must_use]
pub fn neighbors_of(dataset: &Dataset, user_id: UserId, config: &LadleConfig) -> Vec<User> {
    let mut neighbors = users_within_radius(user_id, config.neighborhood.radius_km, dataset.users());
    if !config.neighborhood.include_target {
        neighbors.retain(|user| user.id != user_id);
    }
    neighbors
}

/// Content-based recommendation for `user_id` with its sellability.
///
/// # Errors
///
/// Returns [`Error::Config`](crate::Error::Config) when `config` is invalid.
pub fn content_report(
    dataset: &Dataset,
    user_id: UserId,
    config: &LadleConfig,
) -> Result<RecommendationReport> {
    config.validate()?;
    let start = Instant::now();

    let neighbors = neighbors_of(dataset, user_id, config);
    let matrix =
        ItemSimilarityMatrix::build_with_limit(dataset.catalog(), config.similarity.max_neighbors);
    let recommender = ContentRecommender::new(dataset, &matrix, config.recommend.clone());
    let recommendation = recommender.recommend_default(user_id);

    let scorer = SellabilityScorer::new(dataset.catalog(), config.sellability.clone());
    let sellability = scorer.score(user_id, &recommendation, &neighbors, &recommender);

    tracing::info!(
        user_id,
        neighbors = neighbors.len(),
        recommended = recommendation.len(),
        sellability,
        elapsed_ms = start.elapsed().as_millis(),
        "Content recommendation report ready"
    );

    Ok(RecommendationReport {
        model: CONTENT_MODEL.to_string(),
        precision: 0.0,
        recall: 0.0,
        rmse: 0.0,
        mae: 0.0,
        sellability,
        neighbors: neighbors.len(),
        recommendation,
    })
}

/// Fits and evaluates every configured model on the neighbourhood's orders.
///
/// Only orders of neighbours are used. They are split into train and test
/// sets; each model is fitted on train, evaluated on test, then asked for
/// the user's top `nb_recipes` items among all items of those orders, minus
/// the ones the user rated in train. Sellability compares that list with
/// the same model's recommendation for each neighbour.
///
/// Without neighbour orders the result is empty. A model that fails to
/// build, fit or rank is logged and left out of the result.
///
/// # Errors
///
/// Returns [`Error::Config`](crate::Error::Config) when `config` is invalid.
pub fn collaborative_reports<F>(
    dataset: &Dataset,
    user_id: UserId,
    config: &LadleConfig,
    factory: &F,
) -> Result<Vec<RecommendationReport>>
where
    F: ModelFactory + ?Sized,
{
    config.validate()?;

    let neighbors = neighbors_of(dataset, user_id, config);
    let orders = dataset.orders_from(&neighbors);
    if orders.is_empty() {
        tracing::warn!(
            user_id,
            neighbors = neighbors.len(),
            "No neighbour orders: collaborative models skipped"
        );
        return Ok(Vec::new());
    }
    tracing::info!(
        user_id,
        neighbors = neighbors.len(),
        orders = orders.len(),
        models = config.collaborative.models.len(),
        "Evaluating collaborative models"
    );

    let run = CollaborativeRun::new(dataset, user_id, config, &neighbors, &orders);

    let mut reports = Vec::with_capacity(config.collaborative.models.len());
    for spec in &config.collaborative.models {
        match run.report(spec, factory) {
            Ok(report) => reports.push(report),
            Err(err) => {
                tracing::warn!(
                    user_id,
                    model = %spec.kind,
                    error = %err,
                    "Model skipped"
                );
            }
        }
    }
    Ok(reports)
}

/// Shared inputs of the per-model runs.
struct CollaborativeRun<'a> {
    dataset: &'a Dataset,
    user_id: UserId,
    config: &'a LadleConfig,
    neighbors: &'a [User],
    split: OrderSplit,
    candidates: Vec<ItemId>,
    rated: FxHashMap<UserId, Vec<ItemId>>,
}

impl<'a> CollaborativeRun<'a> {
    fn new(
        dataset: &'a Dataset,
        user_id: UserId,
        config: &'a LadleConfig,
        neighbors: &'a [User],
        orders: &[Order],
    ) -> Self {
        let split = split_orders(
            orders,
            config.collaborative.test_ratio,
            config.collaborative.seed,
        );

        let mut candidates: Vec<ItemId> = orders
            .iter()
            .map(|order| order.item_id)
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();
        candidates.sort_unstable();

        let mut rated: FxHashMap<UserId, Vec<ItemId>> = FxHashMap::default();
        for order in &split.train {
            rated.entry(order.user_id).or_default().push(order.item_id);
        }

        Self {
            dataset,
            user_id,
            config,
            neighbors,
            split,
            candidates,
            rated,
        }
    }

    fn report<F>(&self, spec: &ModelSpec, factory: &F) -> Result<RecommendationReport>
    where
        F: ModelFactory + ?Sized,
    {
        let start = Instant::now();
        let k = self.config.recommend.nb_recipes;

        let mut model = factory.create(spec)?;
        model.fit(&self.split.train)?;
        let scores = evaluate_model(model.as_ref(), &self.split.train, &self.split.test, k)?;
        let recommendation = self.top_k(model.as_ref(), self.user_id)?;

        let model: &dyn RatingModel = model.as_ref();
        let neighbor_recommendation = |neighbor_id: UserId| self.top_k(model, neighbor_id);
        let scorer = SellabilityScorer::new(self.dataset.catalog(), self.config.sellability.clone());
        let sellability = scorer.score(
            self.user_id,
            &recommendation,
            self.neighbors,
            &neighbor_recommendation,
        );

        tracing::info!(
            user_id = self.user_id,
            model = model.name(),
            precision = scores.precision,
            recall = scores.recall,
            sellability,
            elapsed_ms = start.elapsed().as_millis(),
            "Collaborative model evaluated"
        );

        Ok(RecommendationReport {
            model: model.name().to_string(),
            precision: scores.precision,
            recall: scores.recall,
            rmse: scores.rmse,
            mae: scores.mae,
            sellability,
            neighbors: self.neighbors.len(),
            recommendation,
        })
    }

    fn top_k(&self, model: &dyn RatingModel, user_id: UserId) -> Result<Vec<ItemId>> {
        let exclude = self.rated.get(&user_id).map_or(&[][..], Vec::as_slice);
        model.top_k(
            user_id,
            &self.candidates,
            exclude,
            self.config.recommend.nb_recipes,
        )
    }
}
