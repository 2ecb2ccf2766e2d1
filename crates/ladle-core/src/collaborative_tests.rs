//! Tests for the collaborative model contract.

use rustc_hash::FxHashMap;

use super::collaborative::{
    evaluate_model, split_orders, ModelFactory, ModelSpec, OrderSplit, RatingModel,
};
use super::error::{Error, Result};
use super::model::{ItemId, Order, UserId};

/// Predicts the mean training rating of each item.
#[derive(Default)]
struct ItemMean {
    means: FxHashMap<ItemId, f64>,
}

impl RatingModel for ItemMean {
    fn name(&self) -> &str {
        "item_mean"
    }

    fn fit(&mut self, train: &[Order]) -> Result<()> {
        let mut sums: FxHashMap<ItemId, (f64, f64)> = FxHashMap::default();
        for order in train {
            let entry = sums.entry(order.item_id).or_default();
            entry.0 += order.rating.as_f64();
            entry.1 += 1.0;
        }
        self.means = sums.into_iter().map(|(id, (s, n))| (id, s / n)).collect();
        Ok(())
    }

    fn predict(&self, _user_id: UserId, item_id: ItemId) -> Result<f64> {
        self.means
            .get(&item_id)
            .copied()
            .ok_or_else(|| Error::model("item_mean", format!("unknown item {item_id}")))
    }
}

fn orders(triples: &[(u64, u64, u8)]) -> Vec<Order> {
    triples
        .iter()
        .map(|&(u, i, r)| Order::new(u, i, r).unwrap())
        .collect()
}

#[test]
fn test_split_is_deterministic() {
    let all: Vec<Order> = (0..50).map(|i| Order::new(i % 7, i, 3).unwrap()).collect();

    let first = split_orders(&all, 0.2, 42);
    let second = split_orders(&all, 0.2, 42);
    assert_eq!(first, second);
    assert_eq!(first.test.len(), 10);
    assert_eq!(first.train.len(), 40);

    let other = split_orders(&all, 0.2, 7);
    assert_ne!(first.test, other.test);
}

#[test]
fn test_split_partitions_orders() {
    let all: Vec<Order> = (0..20).map(|i| Order::new(1, i, 4).unwrap()).collect();
    let split = split_orders(&all, 0.25, 1);

    let mut items: Vec<u64> = split
        .train
        .iter()
        .chain(&split.test)
        .map(|o| o.item_id)
        .collect();
    items.sort_unstable();
    assert_eq!(items, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_split_edge_ratios() {
    let all = orders(&[(1, 1, 1), (1, 2, 2), (1, 3, 3)]);
    assert!(split_orders(&all, 0.0, 1).test.is_empty());
    assert_eq!(split_orders(&all, 1.0, 1).test.len(), 3);
    assert_eq!(split_orders(&[], 0.5, 1), OrderSplit::default());
}

#[test]
fn test_default_top_k_ranks_by_prediction() {
    let mut model = ItemMean::default();
    model
        .fit(&orders(&[(1, 10, 2), (2, 11, 5), (3, 12, 4), (4, 13, 5)]))
        .unwrap();

    let top = model.top_k(1, &[10, 11, 12, 13], &[], 3).unwrap();
    assert_eq!(top, vec![11, 13, 12]);

    let top = model.top_k(1, &[10, 11, 12, 13], &[11], 2).unwrap();
    assert_eq!(top, vec![13, 12]);
}

#[test]
fn test_evaluate_model() {
    let train = orders(&[(1, 10, 5), (2, 10, 5), (2, 11, 1), (3, 12, 3)]);
    let test = orders(&[(1, 11, 2), (3, 10, 4)]);

    let mut model = ItemMean::default();
    model.fit(&train).unwrap();
    let scores = evaluate_model(&model, &train, &test, 1).unwrap();

    // user 1 gets [12] (10 is rated), wants 11; user 3 gets [10], wants 10
    assert!((scores.precision - 0.5).abs() < 1e-12);
    assert!((scores.recall - 0.5).abs() < 1e-12);
    // predictions 1 vs 2 and 5 vs 4
    assert!((scores.mae - 1.0).abs() < 1e-12);
    assert!((scores.rmse - 1.0).abs() < 1e-12);
}

#[test]
fn test_evaluate_propagates_model_errors() {
    let train = orders(&[(1, 10, 5)]);
    let test = orders(&[(1, 99, 2)]);

    let mut model = ItemMean::default();
    model.fit(&train).unwrap();
    let err = evaluate_model(&model, &train, &test, 1).unwrap_err();
    assert!(matches!(err, Error::Model { .. }));
}

#[test]
fn test_model_spec_params() {
    let spec = ModelSpec::new("svd")
        .with_param("factors", 8.0)
        .with_param("factors", 16.0);
    assert_eq!(spec.param("factors"), Some(16.0));
    assert_eq!(spec.param("epochs"), None);
}

#[test]
fn test_closure_factory() {
    let factory = |spec: &ModelSpec| -> Result<Box<dyn RatingModel>> {
        match spec.kind.as_str() {
            "item_mean" => Ok(Box::new(ItemMean::default())),
            other => Err(Error::model(other, "unknown model kind")),
        }
    };

    let model = factory.create(&ModelSpec::new("item_mean")).unwrap();
    assert_eq!(model.name(), "item_mean");
    assert!(factory.create(&ModelSpec::new("wrmf")).is_err());
}
