use super::api::{ApiClient, Endpoint};
use crate::domain::ApiError;
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{Ack, FeedbackList, FeedbackSubmission};

pub struct FeedbackApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FeedbackApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, feedback: &FeedbackSubmission) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::post("feedback.submit", &["api", "feedback", "submit"]);
        let result = self.client.send(&endpoint, feedback).await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }

    pub async fn list(&self) -> Result<FeedbackList, ApiError> {
        let endpoint = Endpoint::get("feedback.list", &["api", "feedback", "all"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::feedback_list)
    }
}
