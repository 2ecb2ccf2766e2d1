//! Item catalog: recipes and their binary feature vectors.
//!
//! Every item is encoded against one [`FeatureVocabulary`] built once per
//! dataset, so vectors of different items are always column-aligned.

mod vocabulary;


pub use vocabulary::{normalize_label, FeatureFamily, FeatureProjection, FeatureVocabulary};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ItemId;

/// A recipe with its 0/1 feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// One value per vocabulary column, 1.0 meaning "present".
    pub features: Vec<f32>,
}

impl Item {
    /// Returns true when the column at `index` is set.
    #[must_use]
    pub fn has_feature(&self, index: usize) -> bool {
        self.features.get(index).is_some_and(|v| *v > 0.0)
    }

    /// Indices of all set columns.
    pub fn active_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.features
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .map(|(i, _)| i)
    }
}

/// Raw recipe as produced by a scraper or generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique item id.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Raw tag labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw ingredient labels.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// One row of an item table: id, title and one 0/1 value per header column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Unique item id.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Values aligned with the table header.
    pub values: Vec<u8>,
}

/// Immutable set of items sharing one vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vocabulary: FeatureVocabulary,
    items: Vec<Item>,
    index: FxHashMap<ItemId, usize>,
}

impl Catalog {
    /// Creates a catalog from pre-encoded items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when an item's vector width
    /// differs from the vocabulary and [`Error::DuplicateItem`] on repeated ids.
    pub fn new(vocabulary: FeatureVocabulary, mut items: Vec<Item>) -> Result<Self> {
        let width = vocabulary.width();
        if let Some(bad) = items.iter().find(|item| item.features.len() != width) {
            return Err(Error::DimensionMismatch {
                item_id: bad.id,
                expected: width,
                actual: bad.features.len(),
            });
        }

        items.sort_by_key(|item| item.id);
        if let Some(pair) = items.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(Error::DuplicateItem(pair[0].id));
        }

        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id, position))
            .collect();

        Ok(Self {
            vocabulary,
            items,
            index,
        })
    }

    /// Builds the vocabulary from all records' labels, then encodes each record.
    pub fn from_records(records: Vec<ItemRecord>) -> Result<Self> {
        let vocabulary = FeatureVocabulary::from_labels(
            records.iter().flat_map(|r| r.tags.iter()),
            records.iter().flat_map(|r| r.ingredients.iter()),
        );

        let items = records
            .into_iter()
            .map(|record| {
                let mut features = vec![0.0_f32; vocabulary.width()];
                let tag_columns = record
                    .tags
                    .iter()
                    .filter_map(|t| FeatureVocabulary::column_name(FeatureFamily::Tag, t));
                let ingredient_columns = record.ingredients.iter().filter_map(|i| {
                    FeatureVocabulary::column_name(FeatureFamily::Ingredient, i)
                });
                for column in tag_columns.chain(ingredient_columns) {
                    if let Some(position) = vocabulary.index_of(&column) {
                        features[position] = 1.0;
                    }
                }
                Item {
                    id: record.id,
                    title: record.title,
                    features,
                }
            })
            .collect();

        Self::new(vocabulary, items)
    }

    /// Builds a catalog from a tabular layout (`tag_*`/`ingredient_*` columns).
    ///
    /// `header` names the value columns of every row; columns without a
    /// feature prefix are ignored and any non-zero value means "present".
    pub fn from_table<S: AsRef<str>>(header: &[S], rows: Vec<TableRow>) -> Result<Self> {
        let vocabulary = FeatureVocabulary::from_columns(header);
        let positions: Vec<Option<usize>> = header
            .iter()
            .map(|name| vocabulary.index_of(name.as_ref()))
            .collect();

        let items = rows
            .into_iter()
            .map(|row| {
                if row.values.len() != header.len() {
                    return Err(Error::DimensionMismatch {
                        item_id: row.id,
                        expected: header.len(),
                        actual: row.values.len(),
                    });
                }
                let mut features = vec![0.0_f32; vocabulary.width()];
                for (value, position) in row.values.iter().zip(&positions) {
                    match position {
                        Some(position) if *value != 0 => features[*position] = 1.0,
                        _ => {}
                    }
                }
                Ok(Item {
                    id: row.id,
                    title: row.title,
                    features,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(vocabulary, items)
    }

    /// Shared vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &FeatureVocabulary {
        &self.vocabulary
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    /// Returns true when the catalog holds `id`.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Items in ascending id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Items as a slice, ascending by id.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the catalog holds no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
