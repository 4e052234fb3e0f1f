//! # Domain Types
//!
//! Records exchanged with the storefront API.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │◄──│    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  price (Money)  │   │  product_id     │       │
//! │  └─────────────────┘   │  stock          │   │  quantity       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                ▲                                        │
//! │  ┌─────────────────┐   ┌───────┴─────────┐                             │
//! │  │     Order       │──►│   OrderItem     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  total_amount   │   │  price (frozen) │                             │
//! │  │  status         │   │  quantity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record carries the integer primary key the API assigned. The client
//! never invents ids; it only echoes them back in paths and bodies.
//!
//! Response records are consumed verbatim. Fields the API omits on some
//! endpoints (login returns a reduced user record) are `Option` or defaulted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::ADMIN_EMAIL;

// =============================================================================
// User
// =============================================================================

/// An account on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Default shipping address, used to pre-fill checkout.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// True when this account may use the admin operations.
    pub fn is_admin(&self) -> bool {
        self.is_admin || self.email.eq_ignore_ascii_case(ADMIN_EMAIL)
    }

    /// "First Last", falling back to the email when no name is on file.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            _ => self.email.clone(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: i64,
    /// Embedded category record, when the endpoint expands it.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Checks if `quantity` units can be ordered against the listed stock.
    pub fn can_order(&self, quantity: i64) -> bool {
        self.is_active && quantity > 0 && self.stock >= quantity
    }
}

/// Server-side filters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

impl ProductQuery {
    /// Query-string pairs, omitting unset or blank filters.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category_id) = self.category_id {
            pairs.push(("category_id".to_string(), category_id.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search".to_string(), search.to_string()));
            }
        }
        pairs
    }
}

/// Body for creating a product (admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: i64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Partial update of a product (admin). Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// A patch that only flips the active flag.
    pub fn set_active(is_active: bool) -> Self {
        ProductPatch {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the authenticated user's server-side cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
    /// Embedded product record with the current price.
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl CartItem {
    /// Current price × quantity. Zero when the product was not embedded.
    pub fn line_total(&self) -> Money {
        self.product
            .as_ref()
            .map(|p| p.price.multiply_quantity(self.quantity))
            .unwrap_or_default()
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    /// A status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
}

impl PaymentMethod {
    /// Card payments carry card details in the checkout body.
    pub fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "credit_card"),
            PaymentMethod::Paypal => write!(f, "paypal"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit_card" | "card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "payment_method".to_string(),
                allowed: vec!["credit_card".to_string(), "paypal".to_string()],
            }),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub shipping_address: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// A line of a placed order. `price` is frozen at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: Money,
    #[serde(default)]
    pub product: Option<Product>,
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Login body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Profile update body. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Password change body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Card details sent with a `credit_card` checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    pub cardholder_name: String,
    /// Digits only; spaces are stripped before sending.
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
}

/// Checkout body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<CardDetails>,
}

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartAddition {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of `PUT /api/cart/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

// =============================================================================
// Responses
// =============================================================================

/// Successful login/registration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuthSessionWire")]
pub struct AuthSession {
    /// Bearer token. Older API builds name it `access_token`; some send both.
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct AuthSessionWire {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    user: User,
}

impl TryFrom<AuthSessionWire> for AuthSession {
    type Error = String;

    fn try_from(wire: AuthSessionWire) -> Result<Self, Self::Error> {
        let token = wire
            .token
            .or(wire.access_token)
            .ok_or_else(|| "missing field `token`".to_string())?;
        Ok(AuthSession {
            token,
            user: wire.user,
        })
    }
}

/// Successful checkout response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    /// Payment confirmation as reported by the gateway, passed through as-is.
    #[serde(default)]
    pub payment: Option<serde_json::Value>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_login_user_decodes() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "email": "ana@example.com", "is_active": true}"#)
                .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.first_name, None);
        assert!(!user.is_admin());
        assert_eq!(user.display_name(), "ana@example.com");
    }

    #[test]
    fn test_admin_recognised_by_flag_or_email() {
        let mut user: User =
            serde_json::from_str(r#"{"id": 1, "email": "ADMIN@amscrochet.com"}"#).unwrap();
        assert!(user.is_admin());

        user.email = "staff@example.com".to_string();
        assert!(!user.is_admin());
        user.is_admin = true;
        assert!(user.is_admin());
    }

    #[test]
    fn test_product_decodes_api_record() {
        let json = r#"{
            "id": 3,
            "name": "Amigurumi Bear",
            "description": "Hand-made",
            "price": 24.5,
            "stock": 4,
            "image_url": null,
            "category_id": 2,
            "category": {"id": 2, "name": "Toys", "description": null},
            "is_active": true,
            "created_at": "2024-03-01T10:15:30.123456"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.cents(), 2450);
        assert_eq!(product.category.as_ref().unwrap().name, "Toys");
        assert!(product.created_at.is_some());
        assert!(product.can_order(4));
        assert!(!product.can_order(5));
    }

    #[test]
    fn test_unknown_order_status() {
        let status: OrderStatus = serde_json::from_str(r#""refunded""#).unwrap();
        assert_eq!(status, OrderStatus::Unknown);
        let status: OrderStatus = serde_json::from_str(r#""shipped""#).unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }

    #[test]
    fn test_auth_session_accepts_both_token_names() {
        let a: AuthSession =
            serde_json::from_str(r#"{"token": "t1", "user": {"id": 1, "email": "a@b.co"}}"#)
                .unwrap();
        let b: AuthSession = serde_json::from_str(
            r#"{"access_token": "t2", "user": {"id": 1, "email": "a@b.co"}}"#,
        )
        .unwrap();
        assert_eq!(a.token, "t1");
        assert_eq!(b.token, "t2");
    }

    #[test]
    fn test_auth_session_with_both_token_names() {
        let session: AuthSession = serde_json::from_str(
            r#"{"token": "t1", "access_token": "t1", "user": {"id": 1, "email": "a@b.co"}}"#,
        )
        .unwrap();
        assert_eq!(session.token, "t1");

        // `token` wins when the two disagree
        let session: AuthSession = serde_json::from_str(
            r#"{"access_token": "old", "token": "new", "user": {"id": 1, "email": "a@b.co"}}"#,
        )
        .unwrap();
        assert_eq!(session.token, "new");

        let err = serde_json::from_str::<AuthSession>(r#"{"user": {"id": 1, "email": "a@b.co"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_product_query_pairs() {
        let query = ProductQuery {
            category_id: Some(4),
            search: Some("  scarf ".to_string()),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("category_id".to_string(), "4".to_string()),
                ("search".to_string(), "scarf".to_string()),
            ]
        );

        let blank = ProductQuery {
            category_id: None,
            search: Some("   ".to_string()),
        };
        assert!(blank.to_pairs().is_empty());
    }

    #[test]
    fn test_product_patch_skips_unset_fields() {
        let patch = ProductPatch::set_active(false);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"is_active": false})
        );
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!("PayPal".parse::<PaymentMethod>().unwrap(), PaymentMethod::Paypal);
        assert!("cash".parse::<PaymentMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            r#""credit_card""#
        );
    }
}
