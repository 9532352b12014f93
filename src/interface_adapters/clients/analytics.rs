use super::api::{ApiClient, Endpoint};
use crate::domain::ApiError;
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{Ack, AnalyticsEvent, SearchTrends, UserInsights};

pub struct AnalyticsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn track_event(&self, event: &AnalyticsEvent) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::post("analytics.track_event", &["api", "analytics", "track_event"]);
        let result = self.client.send(&endpoint, event).await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }

    pub async fn search_trends(&self) -> Result<SearchTrends, ApiError> {
        let endpoint =
            Endpoint::get("analytics.search_trends", &["api", "analytics", "search_trends"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::search_trends)
    }

    pub async fn user_insights(&self) -> Result<UserInsights, ApiError> {
        let endpoint =
            Endpoint::get("analytics.user_insights", &["api", "analytics", "user_insights"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::user_insights)
    }
}
