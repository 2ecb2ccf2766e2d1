//! All-pairs item similarity rankings.
//!
//! The brute-force build is O(n² · d) in catalog size n and vector width d,
//! fine for catalogs in the low thousands. Larger catalogs should provide
//! an approximate index behind [`SimilarityIndex`]; callers only rely on the
//! ranking contract, never on exhaustive comparison.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cosine::cosine_or_zero;
use crate::catalog::{Catalog, Item};
use crate::model::ItemId;

/// An item id with its similarity to a reference item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Compared item.
    pub item_id: ItemId,
    /// Cosine similarity to the reference item.
    pub score: f64,
}

/// Other items ordered by descending similarity to `item_id`.
///
/// Ties are broken by ascending item id so rankings are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRanking {
    /// Reference item.
    pub item_id: ItemId,
    /// Ranked neighbours, the reference item excluded.
    pub neighbors: Vec<ScoredItem>,
}

impl SimilarityRanking {
    /// Ids of the `k` most similar items (fewer if the ranking is shorter).
    pub fn top(&self, k: usize) -> impl Iterator<Item = ItemId> + '_ {
        self.neighbors.iter().take(k).map(|n| n.item_id)
    }
}

/// Lookup of precomputed similarity rankings.
///
/// Implemented by the brute-force [`ItemSimilarityMatrix`]; an approximate
/// nearest-neighbour index can stand in for it as long as it honours the
/// ordering contract of [`SimilarityRanking`].
pub trait SimilarityIndex: Send + Sync {
    /// Ranking for `item_id`, `None` when the item is unknown.
    fn ranking(&self, item_id: ItemId) -> Option<&SimilarityRanking>;

    /// Number of ranked items.
    fn len(&self) -> usize;

    /// Returns true when no item is ranked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the `k` items most similar to `item_id`.
    fn most_similar(&self, item_id: ItemId, k: usize) -> Vec<ItemId> {
        self.ranking(item_id)
            .map(|ranking| ranking.top(k).collect())
            .unwrap_or_default()
    }
}

/// Exhaustive item-item cosine similarity rankings.
#[derive(Debug, Clone, Default)]
pub struct ItemSimilarityMatrix {
    rankings: Vec<SimilarityRanking>,
    index: FxHashMap<ItemId, usize>,
}

impl ItemSimilarityMatrix {
    /// Ranks every item against every other item of the catalog.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        Self::build_with_limit(catalog, None)
    }

    /// Like [`build`](Self::build), keeping at most `max_neighbors` per ranking.
    ///
    /// Vectors use every feature column (tags and ingredients). All-zero
    /// vectors score 0 against everything instead of failing.
    #[must_use]
    pub fn build_with_limit(catalog: &Catalog, max_neighbors: Option<usize>) -> Self {
        let start = Instant::now();
        let items = catalog.items();

        #[cfg(feature = "parallel")]
        let rankings: Vec<SimilarityRanking> = items
            .par_iter()
            .map(|item| rank_against(item, items, max_neighbors))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rankings: Vec<SimilarityRanking> = items
            .iter()
            .map(|item| rank_against(item, items, max_neighbors))
            .collect();

        let index = rankings
            .iter()
            .enumerate()
            .map(|(position, ranking)| (ranking.item_id, position))
            .collect();

        tracing::info!(
            items = items.len(),
            width = catalog.vocabulary().width(),
            elapsed_ms = start.elapsed().as_millis(),
            "Item similarity matrix built"
        );

        Self { rankings, index }
    }

    /// Rankings in ascending item id order.
    #[must_use]
    pub fn rankings(&self) -> &[SimilarityRanking] {
        &self.rankings
    }
}

impl SimilarityIndex for ItemSimilarityMatrix {
    fn ranking(&self, item_id: ItemId) -> Option<&SimilarityRanking> {
        self.index
            .get(&item_id)
            .map(|&position| &self.rankings[position])
    }

    fn len(&self) -> usize {
        self.rankings.len()
    }
}

fn rank_against(item: &Item, items: &[Item], max_neighbors: Option<usize>) -> SimilarityRanking {
    let mut neighbors: Vec<ScoredItem> = items
        .iter()
        .filter(|other| other.id != item.id)
        .map(|other| ScoredItem {
            item_id: other.id,
            score: cosine_or_zero(&item.features, &other.features),
        })
        .collect();

    neighbors.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    if let Some(limit) = max_neighbors {
        neighbors.truncate(limit);
    }

    SimilarityRanking {
        item_id: item.id,
        neighbors,
    }
}
