// Reqwest clients for the fashion-discovery API, one handle per endpoint group.

mod ai;
mod analytics;
mod api;
mod feedback;
mod moodboard;
mod products;
mod search;
mod user;

pub use ai::AiApi;
pub use analytics::AnalyticsApi;
pub use api::{ApiClient, CallClass, ClientOptions, Timeouts};
pub use feedback::FeedbackApi;
pub use moodboard::MoodboardApi;
pub use products::ProductsApi;
pub use search::SearchApi;
pub use user::UserApi;

impl ApiClient {
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn moodboard(&self) -> MoodboardApi<'_> {
        MoodboardApi::new(self)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    pub fn feedback(&self) -> FeedbackApi<'_> {
        FeedbackApi::new(self)
    }

    pub fn ai(&self) -> AiApi<'_> {
        AiApi::new(self)
    }
}
