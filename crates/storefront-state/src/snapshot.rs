//! # Snapshot
//!
//! The single in-memory representation of client-visible state.
//!
//! A snapshot is never edited in place once published. The reducer builds a
//! new one, and the store swaps it in.

use serde::{Deserialize, Serialize};
use storefront_core::{CartItem, Category, Order, Product, User};

/// Client-visible data at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Authenticated user, if any.
    pub user: Option<User>,
    /// Bearer token, persisted across sessions.
    pub token: Option<String>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub cart_items: Vec<CartItem>,
    pub orders: Vec<Order>,
    /// All accounts; only populated for administrators.
    pub users: Vec<User>,
    /// True while a long-running fetch is in flight.
    pub loading: bool,
}

impl Snapshot {
    /// The start-up snapshot: everything empty except the persisted token.
    pub fn initial(token: Option<String>) -> Self {
        Snapshot {
            token,
            ..Default::default()
        }
    }

    /// True when a token is held. The user record may still be missing
    /// after a restart.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// True when the current user may use the admin operations.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map_or(false, User::is_admin)
    }

    /// Looks up a product in the current listing.
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up the cart line for a product.
    pub fn cart_item_for(&self, product_id: i64) -> Option<&CartItem> {
        self.cart_items.iter().find(|i| i.product_id == product_id)
    }
}
