//! Immutable dataset snapshot: users, orders and the item catalog.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ItemRecord};
use crate::error::{Error, Result};
use crate::model::{Order, User, UserId};

/// Serialisable form of a dataset, as handed over by an external loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    /// All users.
    #[serde(default)]
    pub users: Vec<User>,
    /// All orders.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Raw recipes; the vocabulary is built from their labels.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// Users, orders and items loaded once per invocation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    users: Vec<User>,
    orders: Vec<Order>,
    catalog: Catalog,
    user_index: FxHashMap<UserId, usize>,
    orders_by_user: FxHashMap<UserId, Vec<usize>>,
}

impl Dataset {
    /// Creates a dataset and indexes it by user id.
    ///
    /// Orders referencing unknown users or items are kept: they are simply
    /// dropped by the joins that need them.
    pub fn new(users: Vec<User>, orders: Vec<Order>, catalog: Catalog) -> Result<Self> {
        let mut user_index = FxHashMap::default();
        for (position, user) in users.iter().enumerate() {
            if user_index.insert(user.id, position).is_some() {
                return Err(Error::DuplicateUser(user.id));
            }
        }

        let mut orders_by_user: FxHashMap<UserId, Vec<usize>> = FxHashMap::default();
        for (position, order) in orders.iter().enumerate() {
            orders_by_user
                .entry(order.user_id)
                .or_default()
                .push(position);
        }

        tracing::debug!(
            users = users.len(),
            orders = orders.len(),
            items = catalog.len(),
            "Dataset indexed"
        );

        Ok(Self {
            users,
            orders,
            catalog,
            user_index,
            orders_by_user,
        })
    }

    /// Builds a dataset from a snapshot, encoding items against a fresh vocabulary.
    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Result<Self> {
        let catalog = Catalog::from_records(snapshot.items)?;
        Self::new(snapshot.users, snapshot.orders, catalog)
    }

    /// All users, in load order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All orders, in load order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The item catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&position| &self.users[position])
    }

    /// Orders placed by `user_id`, in load order. Empty for unknown users.
    pub fn orders_of(&self, user_id: UserId) -> impl Iterator<Item = &Order> + '_ {
        self.orders_by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(|&position| &self.orders[position])
    }

    /// Orders placed by any of `users` (inner join on user id), in load order.
    #[must_use]
    pub fn orders_from(&self, users: &[User]) -> Vec<Order> {
        let ids: FxHashSet<UserId> = users.iter().map(|u| u.id).collect();
        self.orders
            .iter()
            .filter(|order| ids.contains(&order.user_id))
            .copied()
            .collect()
    }
}
