//! The signed-in user's server-side cart.
//!
//! Mutations do not edit the snapshot's cart directly; they re-fetch it from
//! the API once the mutation succeeds.

use storefront_core::catalog::check_availability;
use storefront_core::validation::validate_quantity;
use storefront_core::{CartAddition, CartItem, QuantityUpdate};
use storefront_state::Action;

use super::{finish, Dispatcher};
use crate::error::ClientResult;
use crate::outcome::Outcome;
use crate::transport::ApiRequest;

impl Dispatcher {
    pub async fn get_cart(&self) -> Outcome<Vec<CartItem>> {
        finish("get_cart", self.try_get_cart().await)
    }

    pub(super) async fn try_get_cart(&self) -> ClientResult<Vec<CartItem>> {
        let token = self.require_token()?;
        let items: Vec<CartItem> = self.fetch(ApiRequest::get("/api/cart").bearer(token)).await?;
        self.store.dispatch(Action::SetCartItems(items.clone()));
        Ok(items)
    }

    /// Re-fetches the cart after a mutation; failures are only logged.
    pub(super) async fn resync_cart(&self) {
        Self::log_resync("cart", self.try_get_cart().await);
    }

    /// Adds `quantity` units of a product to the cart.
    ///
    /// When the product is in the current listing, its stock and active flag
    /// are checked before sending.
    pub async fn add_to_cart(&self, product_id: i64, quantity: i64) -> Outcome<()> {
        finish("add_to_cart", self.try_add_to_cart(product_id, quantity).await)
    }

    async fn try_add_to_cart(&self, product_id: i64, quantity: i64) -> ClientResult<()> {
        let token = self.require_token()?;
        self.store
            .with_snapshot(|s| check_availability(&s.products, product_id, quantity))?;

        let body = CartAddition {
            product_id,
            quantity,
        };
        self.execute(ApiRequest::post("/api/cart", &body)?.bearer(token))
            .await?;

        self.resync_cart().await;
        Ok(())
    }

    /// Sets the quantity of a cart line.
    pub async fn update_cart_item(&self, item_id: i64, quantity: i64) -> Outcome<()> {
        finish(
            "update_cart_item",
            self.try_update_cart_item(item_id, quantity).await,
        )
    }

    async fn try_update_cart_item(&self, item_id: i64, quantity: i64) -> ClientResult<()> {
        let token = self.require_token()?;
        validate_quantity(quantity)?;

        let body = QuantityUpdate { quantity };
        self.execute(ApiRequest::put(format!("/api/cart/{}", item_id), &body)?.bearer(token))
            .await?;

        self.resync_cart().await;
        Ok(())
    }

    pub async fn remove_from_cart(&self, item_id: i64) -> Outcome<()> {
        finish("remove_from_cart", self.try_remove_from_cart(item_id).await)
    }

    async fn try_remove_from_cart(&self, item_id: i64) -> ClientResult<()> {
        let token = self.require_token()?;
        self.execute(ApiRequest::delete(format!("/api/cart/{}", item_id)).bearer(token))
            .await?;

        self.resync_cart().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::outcome::FailureKind;
    use crate::test_support::FakeBackend;
    use crate::transport::Method;
    use serde_json::json;
    use storefront_core::ProductQuery;

    #[tokio::test]
    async fn test_add_to_cart_refetches_cart() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.store().snapshot().cart_items.is_empty());

        let outcome = dispatcher.add_to_cart(1, 2).await;
        assert!(outcome.success, "{:?}", outcome.message);

        let cart = dispatcher.store().snapshot().cart_items;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id, 1);
        assert_eq!(cart[0].quantity, 2);

        let paths: Vec<(Method, String)> = backend
            .calls()
            .into_iter()
            .map(|c| (c.method, c.path))
            .collect();
        assert_eq!(
            paths,
            vec![
                (Method::Post, "/api/cart".to_string()),
                (Method::Get, "/api/cart".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_to_cart_without_token() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(None);

        let outcome = dispatcher.add_to_cart(1, 1).await;
        assert_eq!(outcome.message.as_deref(), Some("Login required"));
        assert_eq!(outcome.failure, Some(FailureKind::Precondition));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_to_cart_checks_listed_stock() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.get_products(&ProductQuery::default()).await.success);
        let calls_before = backend.call_count();

        let stock = dispatcher.store().snapshot().product(1).unwrap().stock;
        let outcome = dispatcher.add_to_cart(1, stock + 1).await;
        assert_eq!(outcome.failure, Some(FailureKind::Validation));
        assert_eq!(backend.call_count(), calls_before);

        let outcome = dispatcher.add_to_cart(1, 0).await;
        assert_eq!(outcome.failure, Some(FailureKind::Validation));
    }

    #[tokio::test]
    async fn test_update_and_remove_cart_item() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.add_to_cart(1, 1).await.success);
        let item_id = dispatcher.store().snapshot().cart_items[0].id;

        assert!(dispatcher.update_cart_item(item_id, 3).await.success);
        assert_eq!(dispatcher.store().snapshot().cart_items[0].quantity, 3);

        assert!(dispatcher.remove_from_cart(item_id).await.success);
        assert!(dispatcher.store().snapshot().cart_items.is_empty());
    }

    #[tokio::test]
    async fn test_update_cart_item_rejects_bad_quantity() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));

        let outcome = dispatcher.update_cart_item(1, 1000).await;
        assert_eq!(outcome.failure, Some(FailureKind::Validation));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_server_error_skips_refetch() {
        let backend = FakeBackend::new();
        backend.fail_route(
            Method::Post,
            "/api/cart",
            400,
            json!({"error": "Insufficient stock"}),
        );
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));

        let outcome = dispatcher.add_to_cart(1, 2).await;
        assert_eq!(outcome.message.as_deref(), Some("Insufficient stock"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_success() {
        let backend = FakeBackend::new();
        backend.fail_route(Method::Get, "/api/cart", 500, json!({"error": "db down"}));
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));

        let outcome = dispatcher.add_to_cart(1, 2).await;
        assert!(outcome.success);
        assert!(dispatcher.store().snapshot().cart_items.is_empty());
    }
}
