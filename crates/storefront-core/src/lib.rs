//! # storefront-core: Pure Domain Logic for the Storefront Client
//!
//! This crate holds the records exchanged with the storefront API and the
//! pure rules the client applies to them before and after a remote call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Client Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (CLI / views)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatcher operations                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           storefront-client (Action Dispatcher)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ actions                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           storefront-state (State Container)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  filter   │  │   forms   │  │   │
//! │  │   │   Order   │  │  (cents)  │  │  totals   │  │   Luhn    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - API records (User, Product, CartItem, Order, ...) and request payloads
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Product filtering and cart totals
//! - [`error`] - Domain error types
//! - [`validation`] - Client-side form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! // The API sends decimals; we keep cents.
//! let price = Money::from_decimal(10.99);
//! assert_eq!(price.cents(), 1099);
//! assert_eq!((price * 2).to_string(), "$21.98");
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use catalog::{filter_products, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email address the storefront treats as its administrator account.
///
/// The API does not always report an `is_admin` flag on the user record, so
/// the admin panel also recognises this account by address.
pub const ADMIN_EMAIL: &str = "admin@amscrochet.com";

/// Maximum quantity of a single cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 6;
