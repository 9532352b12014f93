// Canned payloads substituted when a call fails and mock fallback is on.
// Each one is shaped like a valid success response for its endpoint.

use serde_json::Map;

use crate::domain::{Moodboard, Product, UserProfile};
use crate::interface_adapters::protocol::{
    Ack, AuthResponse, ChatReply, Favorites, FeedbackList, GeneratedTags, MoodboardList,
    MoodboardSaved, ProductPage, SearchResults, SearchTrends, StyleAnalysis, TrendingProducts,
    UserInsights,
};

pub const DEMO_EMAIL: &str = "niklas123@gmail.com";
pub const DEMO_PASSWORD: &str = "niklas123";
pub const MOCK_TOKEN: &str = "mock_token_123";
pub const MOCK_MOODBOARD_ID: &str = "mock_moodboard_1";

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=300";
const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=32&width=32";
const MOCK_SEARCH_TIME: f64 = 0.1;

fn product(id: &str, title: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price,
        image: Some(PLACEHOLDER_IMAGE.to_string()),
        retailer: None,
        category: None,
        tags: Vec::new(),
        description: None,
        similarity_score: None,
        extra: Map::new(),
    }
}

fn search_hit(id: &str, title: &str, price: f64, score: f64) -> Product {
    Product {
        retailer: Some("Mock Store".to_string()),
        similarity_score: Some(score),
        ..product(id, title, price)
    }
}

pub fn multimodal_results() -> SearchResults {
    SearchResults {
        products: vec![
            search_hit("1", "Mock Product 1", 29.99, 0.95),
            search_hit("2", "Mock Product 2", 49.99, 0.87),
        ],
        total_count: 2,
        search_time: MOCK_SEARCH_TIME,
        query_embedding: None,
        extra: Map::new(),
    }
}

pub fn empty_search() -> SearchResults {
    SearchResults {
        products: Vec::new(),
        total_count: 0,
        search_time: MOCK_SEARCH_TIME,
        query_embedding: None,
        extra: Map::new(),
    }
}

pub fn empty_page() -> ProductPage {
    ProductPage {
        products: Vec::new(),
        total_count: 0,
        extra: Map::new(),
    }
}

pub fn product_detail(id: &str) -> Product {
    Product {
        description: Some("This is a mock product for development".to_string()),
        ..product(id, "Mock Product", 29.99)
    }
}

pub fn trending() -> TrendingProducts {
    TrendingProducts {
        products: Vec::new(),
        extra: Map::new(),
    }
}

pub fn ack() -> Ack {
    Ack {
        success: true,
        extra: Map::new(),
    }
}

fn demo_user() -> UserProfile {
    UserProfile {
        id: "1".to_string(),
        name: "Niklas".to_string(),
        email: DEMO_EMAIL.to_string(),
        avatar: None,
        is_pro: true,
        extra: Map::new(),
    }
}

// Only the fixed demo account can sign in without a backend.
pub fn demo_login(email: &str, password: &str) -> Option<AuthResponse> {
    (email == DEMO_EMAIL && password == DEMO_PASSWORD).then(|| AuthResponse {
        token: MOCK_TOKEN.to_string(),
        user: demo_user(),
        extra: Map::new(),
    })
}

pub fn signup(name: &str, email: &str) -> AuthResponse {
    AuthResponse {
        token: MOCK_TOKEN.to_string(),
        user: UserProfile {
            id: "1".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
            is_pro: false,
            extra: Map::new(),
        },
        extra: Map::new(),
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        avatar: Some(PLACEHOLDER_AVATAR.to_string()),
        ..demo_user()
    }
}

pub fn favorites() -> Favorites {
    Favorites {
        favorites: Vec::new(),
        extra: Map::new(),
    }
}

pub fn moodboard_saved() -> MoodboardSaved {
    MoodboardSaved {
        id: MOCK_MOODBOARD_ID.to_string(),
        success: true,
        extra: Map::new(),
    }
}

pub fn moodboards() -> MoodboardList {
    MoodboardList {
        moodboards: Vec::new(),
        extra: Map::new(),
    }
}

pub fn moodboard(id: &str) -> Moodboard {
    Moodboard::new(id, "Mock Moodboard")
}

pub fn search_trends() -> SearchTrends {
    SearchTrends {
        trends: Vec::new(),
        extra: Map::new(),
    }
}

pub fn user_insights() -> UserInsights {
    UserInsights {
        insights: Map::new(),
        extra: Map::new(),
    }
}

pub fn feedback_list() -> FeedbackList {
    FeedbackList {
        feedback: Vec::new(),
        extra: Map::new(),
    }
}

pub fn chat_reply() -> ChatReply {
    ChatReply {
        message: "I'm a mock AI assistant. The backend API isn't running yet, but I can still \
                  help you explore the interface! Try searching for fashion items or creating \
                  a moodboard."
            .to_string(),
        kind: None,
        data: None,
        extra: Map::new(),
    }
}

pub fn tags() -> GeneratedTags {
    GeneratedTags {
        tags: ["casual", "trendy", "comfortable"].map(String::from).to_vec(),
        extra: Map::new(),
    }
}

pub fn style_analysis() -> StyleAnalysis {
    StyleAnalysis {
        style: "minimalist".to_string(),
        confidence: 0.85,
        tags: ["clean", "simple", "modern"].map(String::from).to_vec(),
        extra: Map::new(),
    }
}
