//! Shared feature vocabulary: the column layout of every item vector.
//!
//! Tag columns always come first, ingredient columns after them, so a
//! projection onto "tags only" is a prefix of the full vector.

use std::ops::Range;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Family a feature column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFamily {
    /// Categorical descriptor (cuisine, diet, course...).
    Tag,
    /// Ingredient presence.
    Ingredient,
}

impl FeatureFamily {
    /// Column-name prefix for this family.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Tag => "tag_",
            Self::Ingredient => "ingredient_",
        }
    }

    /// Classifies a column name by its prefix.
    #[must_use]
    pub fn of_column(name: &str) -> Option<Self> {
        if name.starts_with(Self::Tag.prefix()) {
            Some(Self::Tag)
        } else if name.starts_with(Self::Ingredient.prefix()) {
            Some(Self::Ingredient)
        } else {
            None
        }
    }
}

/// Which feature families a user profile carries.
///
/// Item similarity always uses every column; profiles carry tags only
/// unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureProjection {
    /// Tag columns only.
    #[default]
    Tags,
    /// Tag and ingredient columns.
    TagsAndIngredients,
}

/// Normalises a raw label into a column suffix.
///
/// Lowercases, drops anything that is neither alphanumeric nor whitespace,
/// and joins the remaining words with `_`. Returns `None` when nothing is left.
#[must_use]
pub fn normalize_label(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    (!joined.is_empty()).then_some(joined)
}

/// Ordered feature columns shared by all items of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureVocabulary {
    columns: Vec<String>,
    tag_count: usize,
    index: FxHashMap<String, usize>,
}

impl FeatureVocabulary {
    /// Builds a vocabulary from raw tag and ingredient labels.
    ///
    /// Labels are normalised, prefixed, deduplicated and sorted per family.
    pub fn from_labels<T, I, S1, S2>(tags: T, ingredients: I) -> Self
    where
        T: IntoIterator<Item = S1>,
        I: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let tags = Self::family_columns(FeatureFamily::Tag, tags);
        let ingredients = Self::family_columns(FeatureFamily::Ingredient, ingredients);
        Self::from_parts(tags, ingredients)
    }

    /// Builds a vocabulary from table column names.
    ///
    /// Columns without a `tag_`/`ingredient_` prefix (such as `id` or
    /// `title`) are ignored. Family order is preserved as given.
    pub fn from_columns<S: AsRef<str>>(header: &[S]) -> Self {
        let mut tags = Vec::new();
        let mut ingredients = Vec::new();
        for name in header {
            let name = name.as_ref();
            match FeatureFamily::of_column(name) {
                Some(FeatureFamily::Tag) => tags.push(name.to_string()),
                Some(FeatureFamily::Ingredient) => ingredients.push(name.to_string()),
                None => {}
            }
        }
        Self::from_parts(tags, ingredients)
    }

    fn family_columns<L, S>(family: FeatureFamily, labels: L) -> Vec<String>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<String> = labels
            .into_iter()
            .filter_map(|label| Self::column_name(family, label.as_ref()))
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    fn from_parts(tags: Vec<String>, ingredients: Vec<String>) -> Self {
        let mut columns = Vec::with_capacity(tags.len() + ingredients.len());
        let mut index = FxHashMap::default();
        for name in tags.into_iter().chain(ingredients) {
            if !index.contains_key(&name) {
                index.insert(name.clone(), columns.len());
                columns.push(name);
            }
        }
        let tag_count = columns
            .iter()
            .take_while(|c| c.starts_with(FeatureFamily::Tag.prefix()))
            .count();

        Self {
            columns,
            tag_count,
            index,
        }
    }

    /// Column name for a raw label of the given family.
    #[must_use]
    pub fn column_name(family: FeatureFamily, label: &str) -> Option<String> {
        normalize_label(label).map(|suffix| format!("{}{}", family.prefix(), suffix))
    }

    /// Total number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of tag columns.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tag_count
    }

    /// Number of ingredient columns.
    #[must_use]
    pub fn ingredient_count(&self) -> usize {
        self.columns.len() - self.tag_count
    }

    /// All column names in vector order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column name at `index`.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Family of the column at `index`.
    #[must_use]
    pub fn family(&self, index: usize) -> Option<FeatureFamily> {
        (index < self.columns.len()).then(|| {
            if index < self.tag_count {
                FeatureFamily::Tag
            } else {
                FeatureFamily::Ingredient
            }
        })
    }

    /// Position of a column by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column range covered by a profile projection.
    #[must_use]
    pub fn columns_for(&self, projection: FeatureProjection) -> Range<usize> {
        match projection {
            FeatureProjection::Tags => 0..self.tag_count,
            FeatureProjection::TagsAndIngredients => 0..self.columns.len(),
        }
    }
}
