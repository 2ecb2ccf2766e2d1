//! Per-feature preference weights.

use std::collections::BTreeMap;

use serde::Serialize;

use super::UserProfile;
use crate::catalog::FeatureVocabulary;

/// Mean centred rating of the orders containing one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagWeight {
    /// Vocabulary column of the feature.
    pub column: usize,
    /// Feature (column) name, e.g. `tag_vegan`.
    pub name: String,
    /// Mean centred rating, always finite.
    pub weight: f64,
    /// Number of profile rows containing the feature.
    pub support: usize,
}

/// Weight map of a profile.
///
/// Features never ordered by the user are absent: there is no entry with
/// an undefined (empty) mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagWeights {
    entries: Vec<TagWeight>,
}

impl TagWeights {
    /// Aggregates the centred ratings of `profile` per projected column.
    #[must_use]
    pub fn from_profile(profile: &UserProfile, vocabulary: &FeatureVocabulary) -> Self {
        let mut entries = Vec::new();

        for (offset, column) in profile.columns.clone().enumerate() {
            let (sum, support) = profile
                .rows
                .iter()
                .filter(|row| row.has_feature(offset))
                .fold((0.0_f64, 0_usize), |(sum, n), row| {
                    (sum + row.centered_rating, n + 1)
                });
            if support == 0 {
                continue;
            }
            let Some(name) = vocabulary.column(column) else {
                continue;
            };

            // Reason: support is bounded by the number of orders
            #[allow(clippy::cast_precision_loss)]
            let weight = sum / support as f64;
            if weight.is_finite() {
                entries.push(TagWeight {
                    column,
                    name: name.to_string(),
                    weight,
                    support,
                });
            }
        }

        Self { entries }
    }

    /// Weight of a feature by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.weight)
    }

    /// Returns true when `name` carries a weight.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in vocabulary column order.
    #[must_use]
    pub fn entries(&self) -> &[TagWeight] {
        &self.entries
    }

    /// Number of weighted features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no feature is weighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending weight, ties by ascending name.
    #[must_use]
    pub fn ranked(&self) -> Vec<&TagWeight> {
        let mut ranked: Vec<&TagWeight> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
        ranked
    }

    /// The `n` highest-weighted features (all of them if fewer exist).
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<&TagWeight> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Name to weight map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.weight))
            .collect()
    }
}
