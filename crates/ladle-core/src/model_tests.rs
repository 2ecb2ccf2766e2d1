//! Tests for the data model.

use super::error::Error;
use super::model::{Order, Rating, User};

#[test]
fn test_rating_bounds() {
    assert!(Rating::new(1).is_ok());
    assert!(Rating::new(5).is_ok());
    assert!(matches!(Rating::new(0), Err(Error::InvalidRating(0))));
    assert!(matches!(Rating::new(6), Err(Error::InvalidRating(6))));
}

#[test]
fn test_rating_as_f64() {
    let rating = Rating::new(4).unwrap();
    assert_eq!(rating.value(), 4);
    assert!((rating.as_f64() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_order_rejects_unrated() {
    assert!(Order::new(1, 2, 0).is_err());
    let order = Order::new(1, 2, 3).unwrap();
    assert_eq!(order.rating.value(), 3);
}

#[test]
fn test_order_deserialize_recipe_alias() {
    let order: Order =
        serde_json::from_str(r#"{"user_id": 3, "recipe_id": 9, "rating": 5}"#).unwrap();
    assert_eq!(order.item_id, 9);
    assert_eq!(order.rating.value(), 5);
}

#[test]
fn test_order_deserialize_rejects_out_of_scale() {
    let result = serde_json::from_str::<Order>(r#"{"user_id": 3, "item_id": 9, "rating": 0}"#);
    assert!(result.is_err());
}

#[test]
fn test_user_flattened_location() {
    let user: User =
        serde_json::from_str(r#"{"id": 1, "latitude": 52.21, "longitude": 6.88}"#).unwrap();
    assert_eq!(user.id, 1);
    assert!((user.location.latitude - 52.21).abs() < 1e-9);
}

#[test]
fn test_user_rejects_invalid_coordinates() {
    assert!(User::new(1, 91.0, 0.0).is_err());
    assert!(User::new(1, 0.0, f64::NAN).is_err());
}

#[test]
fn test_user_deserialize_rejects_invalid_coordinates() {
    for json in [
        r#"{"id": 1, "latitude": 200.0, "longitude": 0.0}"#,
        r#"{"id": 1, "latitude": 0.0, "longitude": -500.0}"#,
    ] {
        assert!(serde_json::from_str::<User>(json).is_err(), "{json}");
    }

    let edge: User =
        serde_json::from_str(r#"{"id": 2, "latitude": -90.0, "longitude": 180.0}"#).unwrap();
    assert_eq!(edge, User::new(2, -90.0, 180.0).unwrap());
}
