use super::api::{ApiClient, Endpoint};
use crate::domain::{ApiError, Product};
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{
    Ack, ProductFilters, ProductPage, ProductRef, TrendingProducts,
};

pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &ProductFilters) -> Result<ProductPage, ApiError> {
        let endpoint = Endpoint::get("products.list", &["api", "products", "get_all"]);
        let result = self.client.fetch_with_query(&endpoint, filters).await;
        self.client.or_mock(&endpoint, result, mocks::empty_page)
    }

    pub async fn get(&self, id: &str) -> Result<Product, ApiError> {
        let endpoint = Endpoint::get("products.get", &["api", "products", id]);
        let result = self.client.fetch(&endpoint).await;
        self.client
            .or_mock(&endpoint, result, || mocks::product_detail(id))
    }

    pub async fn like(&self, product_id: &str) -> Result<Ack, ApiError> {
        self.react("products.like", "like", product_id).await
    }

    pub async fn dislike(&self, product_id: &str) -> Result<Ack, ApiError> {
        self.react("products.dislike", "dislike", product_id).await
    }

    pub async fn trending(&self) -> Result<TrendingProducts, ApiError> {
        let endpoint = Endpoint::get("products.trending", &["api", "products", "trending"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::trending)
    }

    async fn react(
        &self,
        operation: &'static str,
        action: &str,
        product_id: &str,
    ) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::post(operation, &["api", "products", action]);
        let result = self
            .client
            .send(&endpoint, &ProductRef { product_id })
            .await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }
}
