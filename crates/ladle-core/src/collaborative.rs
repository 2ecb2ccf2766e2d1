//! Contract for external collaborative-filtering models.
//!
//! The engine does not implement matrix factorisation or neighbourhood
//! models. It splits neighbour orders, hands them to [`RatingModel`]s built
//! by a caller-supplied [`ModelFactory`] from the configured roster of
//! [`ModelSpec`]s, and evaluates them.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{mae, precision_at_k, recall_at_k, rmse};
use crate::model::{ItemId, Order, UserId};

/// A rating model fitted on orders.
pub trait RatingModel: Send + Sync {
    /// Display name used in reports.
    fn name(&self) -> &str;

    /// Fits the model on training orders.
    fn fit(&mut self, train: &[Order]) -> Result<()>;

    /// Predicted rating of `item_id` by `user_id`.
    fn predict(&self, user_id: UserId, item_id: ItemId) -> Result<f64>;

    /// The `k` best candidates for `user_id`, skipping `exclude`.
    ///
    /// The default ranks candidates by predicted rating, highest first,
    /// ties by ascending item id.
    fn top_k(
        &self,
        user_id: UserId,
        candidates: &[ItemId],
        exclude: &[ItemId],
        k: usize,
    ) -> Result<Vec<ItemId>> {
        let excluded: FxHashSet<ItemId> = exclude.iter().copied().collect();
        let mut scored = candidates
            .iter()
            .filter(|item| !excluded.contains(item))
            .map(|&item| Ok((item, self.predict(user_id, item)?)))
            .collect::<Result<Vec<(ItemId, f64)>>>()?;

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(scored.into_iter().take(k).map(|(item, _)| item).collect())
    }
}

/// One entry of the model roster: a model kind and its numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model kind understood by the factory, e.g. `svd`.
    pub kind: String,
    /// Hyper-parameters by name.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl ModelSpec {
    /// Creates a spec without parameters.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Parameter value by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }
}

/// Builds models from roster entries.
pub trait ModelFactory {
    /// Creates an unfitted model for `spec`.
    fn create(&self, spec: &ModelSpec) -> Result<Box<dyn RatingModel>>;
}

impl<F> ModelFactory for F
where
    F: Fn(&ModelSpec) -> Result<Box<dyn RatingModel>>,
{
    fn create(&self, spec: &ModelSpec) -> Result<Box<dyn RatingModel>> {
        self(spec)
    }
}

/// Orders divided into a training and a held-out set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSplit {
    /// Training orders.
    pub train: Vec<Order>,
    /// Held-out orders.
    pub test: Vec<Order>,
}

/// Shuffles `orders` with a seeded generator and holds out `test_ratio` of them.
///
/// The same orders, ratio and seed always give the same split. The held-out
/// count is rounded to the nearest order; `test_ratio` is clamped to `[0, 1]`.
#[must_use]
pub fn split_orders(orders: &[Order], test_ratio: f64, seed: u64) -> OrderSplit {
    let mut shuffled = orders.to_vec();
    shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

    // Reason: the product is non-negative and at most the order count
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let test_len = (shuffled.len() as f64 * test_ratio.clamp(0.0, 1.0)).round() as usize;

    let test = shuffled.split_off(shuffled.len() - test_len.min(shuffled.len()));
    tracing::debug!(
        train = shuffled.len(),
        test = test.len(),
        seed,
        "Orders split"
    );
    OrderSplit {
        train: shuffled,
        test,
    }
}

/// Evaluation scores of one fitted model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    /// Mean precision@k over held-out users.
    pub precision: f64,
    /// Mean recall@k over held-out users.
    pub recall: f64,
    /// Rating prediction RMSE over held-out orders.
    pub rmse: f64,
    /// Rating prediction MAE over held-out orders.
    pub mae: f64,
}

/// Scores a fitted `model` on the held-out `test` orders.
///
/// Ranking metrics: for every held-out user, the model ranks all known items
/// except those the user rated in `train`; the top `k` are compared with the
/// user's held-out items. Rating metrics compare predictions with the
/// held-out ratings.
pub fn evaluate_model(
    model: &dyn RatingModel,
    train: &[Order],
    test: &[Order],
    k: usize,
) -> Result<ModelScores> {
    let mut candidates: Vec<ItemId> = train
        .iter()
        .chain(test)
        .map(|order| order.item_id)
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();
    candidates.sort_unstable();

    let rated = items_by_user(train);
    let held_out = items_by_user(test);
    let mut users: Vec<UserId> = held_out.keys().copied().collect();
    users.sort_unstable();

    let mut precision = 0.0;
    let mut recall = 0.0;
    for user_id in &users {
        let relevant = &held_out[user_id];
        let exclude = rated.get(user_id).map_or(&[][..], Vec::as_slice);
        let top = model.top_k(*user_id, &candidates, exclude, k)?;
        precision += precision_at_k(relevant, &top, k);
        recall += recall_at_k(relevant, &top, k);
    }
    if !users.is_empty() {
        // Reason: user counts stay far below 2^52
        #[allow(clippy::cast_precision_loss)]
        let count = users.len() as f64;
        precision /= count;
        recall /= count;
    }

    let pairs = test
        .iter()
        .map(|order| {
            Ok((
                model.predict(order.user_id, order.item_id)?,
                order.rating.as_f64(),
            ))
        })
        .collect::<Result<Vec<(f64, f64)>>>()?;

    Ok(ModelScores {
        precision,
        recall,
        rmse: rmse(&pairs),
        mae: mae(&pairs),
    })
}

fn items_by_user(orders: &[Order]) -> FxHashMap<UserId, Vec<ItemId>> {
    let mut items: FxHashMap<UserId, Vec<ItemId>> = FxHashMap::default();
    for order in orders {
        items.entry(order.user_id).or_default().push(order.item_id);
    }
    items
}
