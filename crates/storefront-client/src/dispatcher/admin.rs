//! Administrator operations: product management and the user list.
//!
//! All of these need a token. When the snapshot holds a user record that is
//! not an administrator, they fail before sending anything.

use storefront_core::validation::{validate_product_draft, validate_product_patch};
use storefront_core::{Product, ProductDraft, ProductPatch, ProductQuery, User};
use storefront_state::Action;
use tracing::info;

use super::{finish, Dispatcher};
use crate::error::ClientResult;
use crate::outcome::Outcome;
use crate::transport::ApiRequest;

impl Dispatcher {
    /// Re-fetches the full product listing after a mutation.
    async fn resync_products(&self) {
        Self::log_resync(
            "products",
            self.try_get_products(&ProductQuery::default()).await,
        );
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Outcome<Product> {
        finish("create_product", self.try_create_product(draft).await)
    }

    async fn try_create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let token = self.require_admin()?;
        validate_product_draft(draft)?;

        let product: Product = self
            .fetch(ApiRequest::post("/api/products", draft)?.bearer(token))
            .await?;
        info!(product_id = product.id, name = %product.name, "Product created");

        self.resync_products().await;
        Ok(product)
    }

    /// Applies a partial update to a product.
    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> Outcome<Product> {
        finish("update_product", self.try_update_product(id, patch).await)
    }

    async fn try_update_product(&self, id: i64, patch: &ProductPatch) -> ClientResult<Product> {
        let token = self.require_admin()?;
        validate_product_patch(patch)?;

        let product: Product = self
            .fetch(ApiRequest::put(format!("/api/products/{}", id), patch)?.bearer(token))
            .await?;
        info!(product_id = id, "Product updated");

        self.resync_products().await;
        Ok(product)
    }

    /// Deletes a product, drops it from the listing, then re-fetches.
    pub async fn delete_product(&self, id: i64) -> Outcome<()> {
        finish("delete_product", self.try_delete_product(id).await)
    }

    async fn try_delete_product(&self, id: i64) -> ClientResult<()> {
        let token = self.require_admin()?;
        self.execute(ApiRequest::delete(format!("/api/products/{}", id)).bearer(token))
            .await?;
        info!(product_id = id, "Product deleted");

        self.store.dispatch(Action::RemoveProduct(id));
        self.resync_products().await;
        Ok(())
    }

    pub async fn get_all_users(&self) -> Outcome<Vec<User>> {
        finish("get_all_users", self.try_get_all_users().await)
    }

    async fn try_get_all_users(&self) -> ClientResult<Vec<User>> {
        let token = self.require_admin()?;
        let users: Vec<User> = self
            .fetch(ApiRequest::get("/api/admin/users").bearer(token))
            .await?;
        self.store.dispatch(Action::SetUsers(users.clone()));
        Ok(users)
    }
}
