//! User preference profiling.
//!
//! A profile is a user's order history with mean-centred ratings, joined to
//! the projected feature columns of each ordered item. Tag weights aggregate
//! the centred ratings per feature.

mod weights;


pub use weights::{TagWeight, TagWeights};

use std::ops::Range;

use serde::Serialize;

use crate::catalog::{Catalog, FeatureProjection};
use crate::model::{ItemId, Order, Rating, UserId};

/// One order of the profiled user, joined to the item's features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRow {
    /// Ordered item.
    pub item_id: ItemId,
    /// Rating as given.
    pub rating: Rating,
    /// Rating minus the user's mean rating.
    pub centered_rating: f64,
    /// Projected feature values, aligned with [`UserProfile::columns`].
    pub features: Vec<f32>,
}

impl ProfileRow {
    /// Returns true when the projected column `index` is set for this row.
    #[must_use]
    pub fn has_feature(&self, index: usize) -> bool {
        self.features.get(index).is_some_and(|v| *v > 0.0)
    }
}

/// A user's centred order history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    /// Profiled user.
    pub user_id: UserId,
    /// Mean rating over all of the user's orders (0 without orders).
    pub mean_rating: f64,
    /// Vocabulary columns carried by each row.
    pub columns: Range<usize>,
    /// Joined orders, in order-history order.
    pub rows: Vec<ProfileRow>,
}

impl UserProfile {
    /// Builds the profile of `user_id` from `orders`.
    ///
    /// Orders of other users are ignored. The mean is taken over every order
    /// of the user; rows whose item is missing from the catalog are then
    /// dropped, so a profile may carry fewer rows than orders. A user with no
    /// orders gets an empty, valid profile.
    pub fn build<'a, I>(
        user_id: UserId,
        orders: I,
        catalog: &Catalog,
        projection: FeatureProjection,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let own: Vec<&Order> = orders
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();

        let mean_rating = if own.is_empty() {
            0.0
        } else {
            // Reason: order counts stay far below 2^52
            #[allow(clippy::cast_precision_loss)]
            let count = own.len() as f64;
            own.iter().map(|o| o.rating.as_f64()).sum::<f64>() / count
        };

        let columns = catalog.vocabulary().columns_for(projection);
        let mut dropped = 0_usize;
        let rows: Vec<ProfileRow> = own
            .iter()
            .filter_map(|order| {
                let Some(item) = catalog.get(order.item_id) else {
                    dropped += 1;
                    return None;
                };
                Some(ProfileRow {
                    item_id: order.item_id,
                    rating: order.rating,
                    centered_rating: order.rating.as_f64() - mean_rating,
                    features: item.features[columns.clone()].to_vec(),
                })
            })
            .collect();

        if dropped > 0 {
            tracing::warn!(
                user_id,
                dropped,
                "Orders reference items missing from the catalog"
            );
        }

        Self {
            user_id,
            mean_rating,
            columns,
            rows,
        }
    }

    /// Number of joined orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the user has no joined order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-feature mean centred rating (see [`TagWeights`]).
    #[must_use]
    pub fn tag_weights(&self, catalog: &Catalog) -> TagWeights {
        TagWeights::from_profile(self, catalog.vocabulary())
    }
}
