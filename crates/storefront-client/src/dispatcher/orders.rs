//! Order history and checkout.

use chrono::Local;
use storefront_core::validation::{normalize_card_number, validate_checkout};
use storefront_core::{CheckoutReceipt, CheckoutRequest, Order};
use storefront_state::Action;
use tracing::info;

use super::{finish, Dispatcher};
use crate::error::ClientResult;
use crate::outcome::Outcome;
use crate::transport::ApiRequest;

impl Dispatcher {
    pub async fn get_orders(&self) -> Outcome<Vec<Order>> {
        finish("get_orders", self.try_get_orders().await)
    }

    async fn try_get_orders(&self) -> ClientResult<Vec<Order>> {
        let token = self.require_token()?;
        let orders: Vec<Order> = self
            .fetch(ApiRequest::get("/api/orders").bearer(token))
            .await?;
        self.store.dispatch(Action::SetOrders(orders.clone()));
        Ok(orders)
    }

    /// Fetches one order. The order list in the snapshot is not touched.
    pub async fn get_order(&self, id: i64) -> Outcome<Order> {
        finish("get_order", self.try_get_order(id).await)
    }

    async fn try_get_order(&self, id: i64) -> ClientResult<Order> {
        let token = self.require_token()?;
        self.fetch(ApiRequest::get(format!("/api/orders/{}", id)).bearer(token))
            .await
    }

    /// Places an order for the current cart.
    ///
    /// ## Flow
    /// ```text
    /// token? ──► form rules ──► [loading] POST /api/checkout [/loading]
    ///                                    │
    ///                                    ├── re-fetch cart   (now empty)
    ///                                    └── re-fetch orders (new order first)
    /// ```
    pub async fn checkout(&self, request: &CheckoutRequest) -> Outcome<CheckoutReceipt> {
        finish("checkout", self.try_checkout(request).await)
    }

    async fn try_checkout(&self, request: &CheckoutRequest) -> ClientResult<CheckoutReceipt> {
        let token = self.require_token()?;
        validate_checkout(request, Local::now().date_naive())?;

        let mut body = request.clone();
        if let Some(card) = body.payment_details.as_mut() {
            card.card_number = normalize_card_number(&card.card_number);
        }

        let request = ApiRequest::post("/api/checkout", &body)?.bearer(token);
        let receipt = self
            .with_loading(self.fetch::<CheckoutReceipt>(request))
            .await?;
        info!(
            order_id = receipt.order.id,
            total = %receipt.order.total_amount,
            "Order placed"
        );

        self.resync_cart().await;
        Self::log_resync("orders", self.try_get_orders().await);

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use crate::outcome::FailureKind;
    use crate::test_support::{card_checkout, FakeBackend};
    use crate::transport::Method;
    use serde_json::json;
    use storefront_core::{OrderStatus, PaymentMethod};

    #[tokio::test]
    async fn test_checkout_without_token_sends_nothing() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(None);

        let outcome = dispatcher.checkout(&card_checkout()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Login required"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_checkout_places_order_and_resyncs() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.add_to_cart(1, 2).await.success);
        assert_eq!(dispatcher.store().snapshot().cart_items.len(), 1);

        let outcome = dispatcher.checkout(&card_checkout()).await;
        assert!(outcome.success, "{:?}", outcome.message);
        let receipt = outcome.data.unwrap();
        assert_eq!(receipt.order.status, OrderStatus::Paid);
        assert!(receipt.payment.is_some());

        let snapshot = dispatcher.store().snapshot();
        assert!(snapshot.cart_items.is_empty());
        assert_eq!(snapshot.orders.len(), 1);
        assert_eq!(snapshot.orders[0].id, receipt.order.id);
        assert!(!snapshot.loading);

        // Card number goes out without spaces
        let post = backend
            .calls()
            .into_iter()
            .find(|c| c.method == Method::Post && c.path == "/api/checkout")
            .unwrap();
        assert_eq!(
            post.body.unwrap()["payment_details"]["card_number"],
            json!("4111111111111111")
        );
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_card() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));

        let mut request = card_checkout();
        if let Some(card) = request.payment_details.as_mut() {
            card.card_number = "4111 1111 1111 1112".to_string();
        }
        let outcome = dispatcher.checkout(&request).await;
        assert_eq!(outcome.failure, Some(FailureKind::Validation));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_checkout_with_paypal_needs_no_card() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.add_to_cart(2, 1).await.success);

        let mut request = card_checkout();
        request.payment_method = PaymentMethod::Paypal;
        request.payment_details = None;
        assert!(dispatcher.checkout(&request).await.success);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_server_error() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));

        let outcome = dispatcher.checkout(&card_checkout()).await;
        assert_eq!(outcome.failure, Some(FailureKind::Server { status: 400 }));
        assert_eq!(outcome.message.as_deref(), Some("Cart is empty"));
        assert!(!dispatcher.store().snapshot().loading);
    }

    #[tokio::test]
    async fn test_get_order() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(Some(backend.customer_token()));
        assert!(dispatcher.add_to_cart(1, 1).await.success);
        let order_id = dispatcher.checkout(&card_checkout()).await.data.unwrap().order.id;

        let outcome = dispatcher.get_order(order_id).await;
        assert_eq!(outcome.data.unwrap().order_items.len(), 1);

        let outcome = dispatcher.get_order(order_id + 100).await;
        assert_eq!(outcome.failure, Some(FailureKind::Server { status: 404 }));
    }

    #[tokio::test]
    async fn test_get_orders_requires_token() {
        let backend = FakeBackend::new();
        let dispatcher = backend.dispatcher(None);
        let outcome = dispatcher.get_orders().await;
        assert_eq!(outcome.failure, Some(FailureKind::Precondition));
    }
}
