//! # Actions
//!
//! Tagged instructions describing how the snapshot should change.
//!
//! ## Wire Form
//! ```text
//! { "type": "set_loading",    "payload": true }
//! { "type": "remove_product", "payload": 42 }
//! { "type": "logout" }
//! ```
//!
//! Inside the process actions are a closed enum, so the reducer is total and
//! a new tag is a compile error until it is handled. The serialized form is
//! the one place an unknown tag can appear, and [`Action::from_tagged`]
//! rejects it.

use serde::{Deserialize, Serialize};
use storefront_core::{CartItem, Category, Order, Product, User};

use crate::error::{StateError, StateResult};

/// Every change the state container accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SetUser(Option<User>),
    /// Also writes the token to persisted storage, or removes it on `None`.
    SetToken(Option<String>),
    /// Clears user, token and cart together, and removes the stored token.
    Logout,
    SetProducts(Vec<Product>),
    /// Drops every listed product with this id.
    RemoveProduct(i64),
    SetCategories(Vec<Category>),
    SetCartItems(Vec<CartItem>),
    SetOrders(Vec<Order>),
    SetUsers(Vec<User>),
    SetLoading(bool),
}

impl Action {
    /// All tags, in declaration order.
    pub const TAGS: [&'static str; 10] = [
        "set_user",
        "set_token",
        "logout",
        "set_products",
        "remove_product",
        "set_categories",
        "set_cart_items",
        "set_orders",
        "set_users",
        "set_loading",
    ];

    /// The wire tag of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetUser(_) => "set_user",
            Action::SetToken(_) => "set_token",
            Action::Logout => "logout",
            Action::SetProducts(_) => "set_products",
            Action::RemoveProduct(_) => "remove_product",
            Action::SetCategories(_) => "set_categories",
            Action::SetCartItems(_) => "set_cart_items",
            Action::SetOrders(_) => "set_orders",
            Action::SetUsers(_) => "set_users",
            Action::SetLoading(_) => "set_loading",
        }
    }

    /// True for the two actions that touch persisted storage.
    pub fn touches_storage(&self) -> bool {
        matches!(self, Action::SetToken(_) | Action::Logout)
    }

    /// Decodes an action from its `{"type", "payload"}` form.
    ///
    /// ## Errors
    /// - [`StateError::UnknownAction`] when the tag is missing or not one of
    ///   [`Action::TAGS`]
    /// - [`StateError::InvalidPayload`] when the tag is known but the payload
    ///   does not fit it
    pub fn from_tagged(value: serde_json::Value) -> StateResult<Self> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| StateError::UnknownAction("<missing>".to_string()))?
            .to_string();

        if !Self::TAGS.contains(&tag.as_str()) {
            return Err(StateError::UnknownAction(tag));
        }

        serde_json::from_value(value).map_err(|e| StateError::InvalidPayload {
            tag,
            reason: e.to_string(),
        })
    }
}
