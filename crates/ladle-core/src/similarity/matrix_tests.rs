//! Tests for the item similarity matrix.

use super::matrix::{ItemSimilarityMatrix, SimilarityIndex};
use crate::catalog::{Catalog, FeatureVocabulary, Item};

fn item(id: u64, features: &[f32]) -> Item {
    Item {
        id,
        title: format!("Item {id}"),
        features: features.to_vec(),
    }
}

fn catalog(items: Vec<Item>) -> Catalog {
    let width = items.first().map_or(0, |i| i.features.len());
    let tags: Vec<String> = (0..width).map(|i| format!("t{i}")).collect();
    Catalog::new(
        FeatureVocabulary::from_labels(tags, Vec::<String>::new()),
        items,
    )
    .unwrap()
}

#[test]
fn test_ranking_orders_by_descending_similarity() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![
        item(1, &[1.0, 1.0, 0.0]),
        item(2, &[1.0, 0.0, 1.0]),
        item(3, &[1.0, 1.0, 0.0]),
        item(4, &[0.0, 0.0, 1.0]),
    ]));

    let ranking = matrix.ranking(1).unwrap();
    let ids: Vec<u64> = ranking.neighbors.iter().map(|n| n.item_id).collect();
    assert_eq!(ids, vec![3, 2, 4]);
    assert!((ranking.neighbors[0].score - 1.0).abs() < 1e-12);
    assert!((ranking.neighbors[1].score - 0.5).abs() < 1e-12);
    assert_eq!(ranking.neighbors[2].score, 0.0);
}

#[test]
fn test_ranking_excludes_self() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![
        item(1, &[1.0, 0.0]),
        item(2, &[0.0, 1.0]),
    ]));
    assert_eq!(matrix.most_similar(1, 3), vec![2]);
    assert_eq!(matrix.most_similar(2, 3), vec![1]);
}

#[test]
fn test_ties_break_by_ascending_id() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![
        item(9, &[1.0, 0.0]),
        item(5, &[1.0, 0.0]),
        item(7, &[1.0, 0.0]),
        item(1, &[1.0, 0.0]),
    ]));
    assert_eq!(matrix.most_similar(7, 10), vec![1, 5, 9]);
}

#[test]
fn test_degenerate_item_scores_zero() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![
        item(1, &[0.0, 0.0]),
        item(2, &[1.0, 0.0]),
        item(3, &[1.0, 1.0]),
    ]));

    let bare = matrix.ranking(1).unwrap();
    assert!(bare.neighbors.iter().all(|n| n.score == 0.0));
    assert_eq!(matrix.most_similar(1, 2), vec![2, 3]);

    // The degenerate item ranks last for the others.
    assert_eq!(matrix.most_similar(2, 2), vec![3, 1]);
}

#[test]
fn test_limit_truncates_rankings() {
    let matrix = ItemSimilarityMatrix::build_with_limit(
        &catalog(vec![
            item(1, &[1.0, 0.0]),
            item(2, &[1.0, 1.0]),
            item(3, &[0.0, 1.0]),
        ]),
        Some(1),
    );
    assert_eq!(matrix.ranking(1).unwrap().neighbors.len(), 1);
    assert_eq!(matrix.most_similar(1, 3), vec![2]);
}

#[test]
fn test_unknown_item_and_empty_catalog() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![item(1, &[1.0])]));
    assert!(matrix.ranking(2).is_none());
    assert!(matrix.most_similar(2, 3).is_empty());
    assert_eq!(matrix.len(), 1);
    assert!(matrix.ranking(1).unwrap().neighbors.is_empty());

    let empty = ItemSimilarityMatrix::build(&Catalog::default());
    assert!(empty.is_empty());
}

#[test]
fn test_rankings_follow_catalog_order() {
    let matrix = ItemSimilarityMatrix::build(&catalog(vec![
        item(3, &[1.0, 0.0]),
        item(1, &[0.0, 1.0]),
        item(2, &[1.0, 1.0]),
    ]));
    let ids: Vec<u64> = matrix.rankings().iter().map(|r| r.item_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
