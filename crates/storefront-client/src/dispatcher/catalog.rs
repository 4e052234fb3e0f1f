//! Product listing and categories. These endpoints are public.

use storefront_core::validation::validate_search_query;
use storefront_core::{Category, Product, ProductQuery};
use storefront_state::Action;
use tracing::debug;

use super::{finish, Dispatcher};
use crate::error::ClientResult;
use crate::outcome::Outcome;
use crate::transport::ApiRequest;

impl Dispatcher {
    /// Fetches the product listing, filtered server-side by `query`.
    ///
    /// The loading flag is raised for the duration of the request.
    pub async fn get_products(&self, query: &ProductQuery) -> Outcome<Vec<Product>> {
        let result = self.with_loading(self.try_get_products(query)).await;
        finish("get_products", result)
    }

    pub(super) async fn try_get_products(&self, query: &ProductQuery) -> ClientResult<Vec<Product>> {
        if let Some(search) = &query.search {
            validate_search_query(search)?;
        }

        let products: Vec<Product> = self
            .fetch(ApiRequest::get("/api/products").query(query.to_pairs()))
            .await?;
        debug!(count = products.len(), "Products fetched");

        self.store.dispatch(Action::SetProducts(products.clone()));
        Ok(products)
    }

    /// Fetches one product. The listing in the snapshot is not touched.
    pub async fn get_product(&self, id: i64) -> Outcome<Product> {
        let result = self
            .fetch(ApiRequest::get(format!("/api/products/{}", id)))
            .await;
        finish("get_product", result)
    }

    pub async fn get_categories(&self) -> Outcome<Vec<Category>> {
        finish("get_categories", self.try_get_categories().await)
    }

    async fn try_get_categories(&self) -> ClientResult<Vec<Category>> {
        let categories: Vec<Category> = self.fetch(ApiRequest::get("/api/categories")).await?;
        self.store.dispatch(Action::SetCategories(categories.clone()));
        Ok(categories)
    }
}
