//! # Shopping Commands
//!
//! Catalog, cart and checkout.
//!
//! ## Cart View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ storefront cart                                                      │
//! │                                                                         │
//! │  { "success": true,                                                     │
//! │    "data": {                                                            │
//! │      "items":  [ { "product_id": 1, "quantity": 2, ... } ],             │
//! │      "totals": { "item_count": 1, "total_quantity": 2,                  │
//! │                  "subtotal": 50.0 } } }                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_client::Dispatcher;
use storefront_core::{
    filter_products, CardDetails, CartItem, CartTotals, CheckoutRequest, Product, ProductQuery,
};
use tracing::debug;

use super::{render, Rendered};
use crate::cli::CheckoutArgs;
use crate::error::CliResult;

/// Cart lines with their totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<Vec<CartItem>> for CartView {
    fn from(items: Vec<CartItem>) -> Self {
        let totals = CartTotals::from(items.as_slice());
        CartView { items, totals }
    }
}

/// Fetches the listing with the filters applied server-side, then applies
/// them again to the returned list.
pub async fn products(
    dispatcher: &Dispatcher,
    search: Option<String>,
    category: Option<i64>,
) -> CliResult<Rendered> {
    let query = ProductQuery {
        category_id: category,
        search: search.clone(),
    };
    let outcome = dispatcher.get_products(&query).await.map(|listing| {
        filter_products(&listing, search.as_deref(), category)
            .into_iter()
            .cloned()
            .collect::<Vec<Product>>()
    });
    render(outcome)
}

pub async fn cart(dispatcher: &Dispatcher) -> CliResult<Rendered> {
    render(dispatcher.get_cart().await.map(CartView::from))
}

/// Builds the checkout body from the arguments and places the order.
///
/// Without `--address` the address on the profile is used.
pub async fn checkout(dispatcher: &Dispatcher, args: CheckoutArgs) -> CliResult<Rendered> {
    let shipping_address = match args.address {
        Some(address) => address,
        None => profile_address(dispatcher).await.unwrap_or_default(),
    };

    let payment_details = if args.payment.requires_card() {
        Some(CardDetails {
            cardholder_name: args.cardholder.unwrap_or_default(),
            card_number: args.card_number.unwrap_or_default(),
            expiry_date: args.expiry.unwrap_or_default(),
            cvv: args.cvv.unwrap_or_default(),
        })
    } else {
        None
    };

    let request = CheckoutRequest {
        shipping_address,
        payment_method: args.payment,
        payment_details,
    };
    render(dispatcher.checkout(&request).await)
}

async fn profile_address(dispatcher: &Dispatcher) -> Option<String> {
    let known = dispatcher
        .store()
        .with_snapshot(|s| s.user.as_ref().and_then(|u| u.address.clone()));
    if known.is_some() {
        return known;
    }
    if dispatcher.store().token().is_none() {
        return None;
    }

    debug!("No shipping address given, using the profile address");
    dispatcher.get_profile().await.data.and_then(|u| u.address)
}
