use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::entities::UserProfile;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::protocol::ChatReply;

// Prior messages sent along with each new one.
pub const CONTEXT_WINDOW: usize = 5;

const OFFLINE_REPLY: &str = "I'm having trouble connecting right now, but I can still help! \
                             Try asking me about fashion trends, style advice, or creating \
                             moodboards. I have lots of fashion knowledge built-in!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// Conversation with the style assistant; keeps the history for context.
pub struct ChatAssistant {
    client: ApiClient,
    history: Vec<ChatMessage>,
}

impl ChatAssistant {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends `text` and returns the assistant's reply.
    ///
    /// Never fails: if the call errors, a canned suggestion is returned and
    /// recorded like any other reply.
    pub async fn send(&mut self, text: &str, user: Option<&UserProfile>) -> ChatReply {
        let context = self.build_context(user);
        self.history.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });

        let reply = match self.client.ai().chat(text, Some(&context)).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed; answering offline");
                ChatReply {
                    message: OFFLINE_REPLY.to_string(),
                    kind: Some("suggestion".to_string()),
                    data: None,
                    extra: Map::new(),
                }
            }
        };

        self.history.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply.message.clone(),
        });
        reply
    }

    pub fn build_context(&self, user: Option<&UserProfile>) -> Value {
        let start = self.history.len().saturating_sub(CONTEXT_WINDOW);
        let recent = &self.history[start..];

        json!({
            "context": recent,
            "user_id": user.map(|u| u.id.as_str()),
            "user_preferences": user.map(|u| json!({ "name": u.name, "isPro": u.is_pro })),
        })
    }
}
