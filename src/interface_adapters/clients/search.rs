use super::api::{ApiClient, CallClass, Endpoint};
use crate::domain::ApiError;
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{
    ImageSearchRequest, MultimodalSearchRequest, SearchResults, TextSearchRequest,
};

// Search endpoints. All of them run under the extended timeout.
pub struct SearchApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SearchApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn multimodal(
        &self,
        request: &MultimodalSearchRequest,
    ) -> Result<SearchResults, ApiError> {
        let endpoint = Endpoint::post("search.multimodal", &["api", "search", "combined"])
            .class(CallClass::Extended);
        let result = self.client.send(&endpoint, request).await;
        self.client
            .or_mock(&endpoint, result, mocks::multimodal_results)
    }

    pub async fn text(&self, query: &str) -> Result<SearchResults, ApiError> {
        let endpoint =
            Endpoint::post("search.text", &["api", "search", "text"]).class(CallClass::Extended);
        let result = self
            .client
            .send(&endpoint, &TextSearchRequest { query })
            .await;
        self.client.or_mock(&endpoint, result, mocks::empty_search)
    }

    // Images are data URLs or base64 payloads, passed through untouched.
    pub async fn image(&self, images: &[String]) -> Result<SearchResults, ApiError> {
        let endpoint =
            Endpoint::post("search.image", &["api", "search", "image"]).class(CallClass::Extended);
        let result = self
            .client
            .send(&endpoint, &ImageSearchRequest { images })
            .await;
        self.client.or_mock(&endpoint, result, mocks::empty_search)
    }

    pub async fn similar(&self, product_id: &str) -> Result<SearchResults, ApiError> {
        let endpoint = Endpoint::get("search.similar", &["api", "search", "similar", product_id])
            .class(CallClass::Extended);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::empty_search)
    }
}
