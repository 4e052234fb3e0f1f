//! # Reducer
//!
//! The pure transition function `(snapshot, action) -> snapshot`.
//!
//! ## Field Ownership
//! ```text
//! ┌──────────────────┬────────────────────────────────────────────┐
//! │  Action          │  Fields changed                            │
//! ├──────────────────┼────────────────────────────────────────────┤
//! │  SetUser         │  user                                      │
//! │  SetToken        │  token                                     │
//! │  Logout          │  user = None, token = None, cart_items = []│
//! │  SetProducts     │  products                                  │
//! │  RemoveProduct   │  products (matching id dropped)            │
//! │  SetCategories   │  categories                                │
//! │  SetCartItems    │  cart_items                                │
//! │  SetOrders       │  orders                                    │
//! │  SetUsers        │  users                                     │
//! │  SetLoading      │  loading                                   │
//! └──────────────────┴────────────────────────────────────────────┘
//! ```
//! Every other field is carried over. Storage writes for `SetToken` and
//! `Logout` happen in [`crate::Store::dispatch`], not here.

use crate::action::Action;
use crate::snapshot::Snapshot;

/// Applies `action` to `current`, returning the next snapshot.
pub fn reduce(current: &Snapshot, action: &Action) -> Snapshot {
    let mut next = current.clone();

    match action {
        Action::SetUser(user) => next.user = user.clone(),
        Action::SetToken(token) => next.token = token.clone(),
        Action::Logout => {
            next.user = None;
            next.token = None;
            next.cart_items = Vec::new();
        }
        Action::SetProducts(products) => next.products = products.clone(),
        Action::RemoveProduct(id) => next.products.retain(|p| p.id != *id),
        Action::SetCategories(categories) => next.categories = categories.clone(),
        Action::SetCartItems(items) => next.cart_items = items.clone(),
        Action::SetOrders(orders) => next.orders = orders.clone(),
        Action::SetUsers(users) => next.users = users.clone(),
        Action::SetLoading(loading) => next.loading = *loading,
    }

    next
}
