//! Core data model: users, orders and ratings.
//!
//! Users and orders are loaded once per invocation by an external loader and
//! are never mutated by the engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Geolocation;

/// User identifier.
pub type UserId = u64;

/// Item (recipe) identifier.
pub type ItemId = u64;

/// A rating on the 1..=5 scale.
///
/// Zero is not a rating: an item a user never ordered is simply absent from
/// their history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside `MIN..=MAX`.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRating(value))
        }
    }

    /// Raw rating value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Rating as a float, for averaging.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A user and their home location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: UserId,
    /// Home location (WGS84 degrees).
    #[serde(flatten)]
    pub location: Geolocation,
}

impl User {
    /// Creates a user at the given coordinates.
    pub fn new(id: UserId, latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            id,
            location: Geolocation::new(latitude, longitude)?,
        })
    }
}

/// A single rated order of an item by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Ordering user.
    pub user_id: UserId,
    /// Ordered item.
    #[serde(alias = "recipe_id")]
    pub item_id: ItemId,
    /// Rating given to the order.
    pub rating: Rating,
}

impl Order {
    /// Creates an order, validating the rating.
    pub fn new(user_id: UserId, item_id: ItemId, rating: u8) -> Result<Self> {
        Ok(Self {
            user_id,
            item_id,
            rating: Rating::new(rating)?,
        })
    }
}
