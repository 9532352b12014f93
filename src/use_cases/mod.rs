pub mod analytics;
pub mod auth;
pub mod chat;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use analytics::AnalyticsTracker;
pub use auth::AuthSession;
pub use chat::{ChatAssistant, ChatMessage, ChatRole};
pub use search::{MultimodalSearch, SearchInput};
