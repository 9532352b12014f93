use super::api::{ApiClient, CallClass, Endpoint};
use crate::domain::{ApiError, Moodboard};
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{
    Ack, MoodboardList, MoodboardSaved, ProductPage, SaveMoodboardRequest,
};

pub struct MoodboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MoodboardApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn save(&self, board: &Moodboard) -> Result<MoodboardSaved, ApiError> {
        let endpoint = Endpoint::post("moodboard.save", &["api", "moodboard", "save"]);
        let result = self
            .client
            .send(&endpoint, &SaveMoodboardRequest::from(board))
            .await;
        self.client.or_mock(&endpoint, result, mocks::moodboard_saved)
    }

    pub async fn list(&self) -> Result<MoodboardList, ApiError> {
        let endpoint = Endpoint::get("moodboard.list", &["api", "moodboard", "list"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::moodboards)
    }

    pub async fn get(&self, id: &str) -> Result<Moodboard, ApiError> {
        let endpoint = Endpoint::get("moodboard.get", &["api", "moodboard", id]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, || mocks::moodboard(id))
    }

    pub async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::delete("moodboard.delete", &["api", "moodboard", id]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }

    // Runs a multi-image search seeded by the saved board's images.
    pub async fn search(&self, id: &str) -> Result<ProductPage, ApiError> {
        let endpoint = Endpoint::post("moodboard.search", &["api", "moodboard", id, "search"])
            .class(CallClass::Extended);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::empty_page)
    }
}
