use serde_json::Value;

use super::api::{ApiClient, CallClass, Endpoint};
use crate::domain::{ApiError, Product};
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{
    AnalyzeStyleRequest, ChatReply, ChatRequest, GeneratedTags, StyleAnalysis,
};

// Assistant endpoints. Model calls are slow, so they share the search timeout.
pub struct AiApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AiApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn chat(&self, message: &str, context: Option<&Value>) -> Result<ChatReply, ApiError> {
        let endpoint = Endpoint::post("ai.chat", &["api", "ai", "chat"]).class(CallClass::Extended);
        let result = self
            .client
            .send(&endpoint, &ChatRequest { message, context })
            .await;
        self.client.or_mock(&endpoint, result, mocks::chat_reply)
    }

    pub async fn generate_tags(&self, product: &Product) -> Result<GeneratedTags, ApiError> {
        let endpoint = Endpoint::post("ai.generate_tags", &["api", "ai", "generate_tags"])
            .class(CallClass::Extended);
        let result = self.client.send(&endpoint, product).await;
        self.client.or_mock(&endpoint, result, mocks::tags)
    }

    pub async fn analyze_style(&self, image_url: &str) -> Result<StyleAnalysis, ApiError> {
        let endpoint = Endpoint::post("ai.analyze_style", &["api", "ai", "analyze_style"])
            .class(CallClass::Extended);
        let result = self
            .client
            .send(&endpoint, &AnalyzeStyleRequest { image_url })
            .await;
        self.client.or_mock(&endpoint, result, mocks::style_analysis)
    }
}
