//! # Catalog Helpers
//!
//! Pure functions over already-fetched catalog and cart data.
//!
//! The listing endpoint filters server-side; these helpers cover the views
//! that refine an in-memory list without another round trip, and the cart
//! summary shown next to the checkout button.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::validation::validate_quantity;

/// Filters products by an optional search term and category.
///
/// The search is case-insensitive over name and description. A blank term
/// matches everything.
///
/// ## Example
/// ```rust
/// use storefront_core::{filter_products, Money, Product};
///
/// let products = vec![Product {
///     id: 1,
///     name: "Wool Scarf".to_string(),
///     description: "Chunky knit".to_string(),
///     price: Money::from_cents(2500),
///     stock: 3,
///     image_url: None,
///     category_id: 2,
///     category: None,
///     is_active: true,
///     created_at: None,
/// }];
///
/// assert_eq!(filter_products(&products, Some("SCARF"), None).len(), 1);
/// assert!(filter_products(&products, None, Some(9)).is_empty());
/// ```
pub fn filter_products<'a>(
    products: &'a [Product],
    search: Option<&str>,
    category_id: Option<i64>,
) -> Vec<&'a Product> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    products
        .iter()
        .filter(|p| category_id.map_or(true, |id| p.category_id == id))
        .filter(|p| match &needle {
            Some(needle) => {
                p.name.to_lowercase().contains(needle.as_str())
                    || p.description.to_lowercase().contains(needle.as_str())
            }
            None => true,
        })
        .collect()
}

/// Checks a requested quantity against what the client knows of a product.
///
/// Products not present in `products` pass; the API decides those.
pub fn check_availability(products: &[Product], product_id: i64, quantity: i64) -> CoreResult<()> {
    validate_quantity(quantity)?;

    let Some(product) = products.iter().find(|p| p.id == product_id) else {
        return Ok(());
    };

    if !product.is_active {
        return Err(CoreError::ProductUnavailable(product.name.clone()));
    }

    if product.stock < quantity {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested: quantity,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Summary of the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of line quantities.
    pub total_quantity: i64,
    /// Sum of current price × quantity. Lines without an embedded product
    /// contribute nothing.
    pub subtotal: Money,
}

impl From<&[CartItem]> for CartTotals {
    fn from(items: &[CartItem]) -> Self {
        CartTotals {
            item_count: items.len(),
            total_quantity: items
                .iter()
                .fold(0, |acc: i64, i| acc.saturating_add(i.quantity)),
            subtotal: items.iter().map(CartItem::line_total).sum(),
        }
    }
}

impl CartTotals {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
