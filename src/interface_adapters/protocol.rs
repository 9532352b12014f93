use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Moodboard, MoodboardImage, Product, SearchMode, UserProfile};

// Request payloads sent to the API.

#[derive(Clone, Debug, Default, Serialize)]
pub struct MultimodalSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinterest_url: Option<String>,
    pub mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextSearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageSearchRequest<'a> {
    pub images: &'a [String],
}

// Query parameters accepted by the product listing endpoint.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retailer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductRef<'a> {
    pub product_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// Moodboard as submitted for saving. A missing id asks the API to allocate one.
#[derive(Clone, Debug, Serialize)]
pub struct SaveMoodboardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub images: Vec<MoodboardImage>,
}

impl From<&Moodboard> for SaveMoodboardRequest {
    fn from(board: &Moodboard) -> Self {
        Self {
            id: (!board.id.is_empty()).then(|| board.id.clone()),
            name: board.name.clone(),
            images: board.images.clone(),
        }
    }
}

// Analytics event; free-form data is flattened next to the fixed keys.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsEvent {
    pub event_type: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FeedbackSubmission {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeStyleRequest<'a> {
    pub image_url: &'a str,
}

// Response payloads returned by the API (or substituted by the mock fallback).
// Each keeps fields it does not model in `extra`, so bodies pass through unchanged.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub search_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_embedding: Option<Vec<f32>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendingProducts {
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    // Some endpoints answer 2xx with only a message.
    #[serde(default)]
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    pub favorites: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodboardSaved {
    pub id: String,
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodboardList {
    pub moodboards: Vec<Moodboard>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchTrends {
    pub trends: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInsights {
    pub insights: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackList {
    pub feedback: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTags {
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub style: String,
    pub confidence: f64,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Error envelope the API uses for non-2xx bodies (FastAPI uses `detail`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        match (self.message, self.detail) {
            (Some(message), _) => Some(message),
            (None, Some(Value::String(detail))) => Some(detail),
            (None, Some(detail)) => Some(detail.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_multimodal_request_has_no_images_then_field_is_omitted() {
        let request = MultimodalSearchRequest {
            text: Some("linen".to_string()),
            mode: SearchMode::Text,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({"text": "linen", "mode": "text"})
        );
    }

    #[test]
    fn when_analytics_event_has_data_then_it_is_flattened() {
        let mut data = Map::new();
        data.insert("message_length".to_string(), json!(12));
        let event = AnalyticsEvent {
            event_type: "chat_message_sent".to_string(),
            data,
            page_path: Some("/explore".to_string()),
            timestamp: None,
        };

        assert_eq!(
            serde_json::to_value(&event).expect("serialize"),
            json!({
                "event_type": "chat_message_sent",
                "message_length": 12,
                "page_path": "/explore"
            })
        );
    }

    #[test]
    fn when_moodboard_has_empty_id_then_save_request_omits_it() {
        let board = Moodboard::new("", "Capsule");
        let request = SaveMoodboardRequest::from(&board);

        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({"name": "Capsule", "images": []})
        );
    }

    #[test]
    fn when_auth_response_has_extra_fields_then_body_round_trips_unchanged() {
        let body = json!({
            "token": "tok-7",
            "user": {"id": "7", "name": "Ines", "email": "ines@example.com", "isPro": true},
            "expires_in": 3600,
            "token_type": "bearer"
        });

        let response: AuthResponse = serde_json::from_value(body.clone()).expect("decode");

        assert_eq!(response.extra["expires_in"], 3600);
        assert_eq!(serde_json::to_value(&response).expect("encode"), body);
    }

    #[test]
    fn when_ack_has_no_success_flag_then_it_still_decodes() {
        let ack: Ack = serde_json::from_value(json!({"message": "liked"})).expect("decode");

        assert!(!ack.success);
        assert_eq!(ack.extra["message"], "liked");
    }

    #[test]
    fn when_error_body_uses_detail_then_message_is_extracted() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Search failed"})).expect("body");
        assert_eq!(body.into_message().as_deref(), Some("Search failed"));

        let body: ErrorBody =
            serde_json::from_value(json!({"detail": [{"loc": ["query"]}]})).expect("body");
        assert_eq!(
            body.into_message().as_deref(),
            Some(r#"[{"loc":["query"]}]"#)
        );
    }
}
