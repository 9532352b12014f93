use chrono::SecondsFormat;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::ports::Clock;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::protocol::AnalyticsEvent;

// Keys the tracker owns; caller data cannot override them.
const RESERVED_KEYS: [&str; 4] = ["event_type", "page_path", "timestamp", "client_session_id"];

/// Fire-and-forget analytics.
///
/// Events are stamped with the current page, an RFC 3339 timestamp and a
/// per-tracker session id. Failures are logged and never reach the caller.
pub struct AnalyticsTracker<C> {
    client: ApiClient,
    clock: C,
    enabled: bool,
    client_session_id: String,
    page_path: Mutex<Option<String>>,
}

impl<C> AnalyticsTracker<C>
where
    C: Clock,
{
    pub fn new(client: ApiClient, clock: C, enabled: bool) -> Self {
        Self {
            client,
            clock,
            enabled,
            client_session_id: Uuid::new_v4().to_string(),
            page_path: Mutex::new(None),
        }
    }

    pub fn client_session_id(&self) -> &str {
        &self.client_session_id
    }

    pub async fn current_page(&self) -> Option<String> {
        self.page_path.lock().await.clone()
    }

    /// Records a navigation and reports it as a `page_view` event.
    pub async fn page_view(&self, path: &str, query: &str) -> bool {
        *self.page_path.lock().await = Some(path.to_string());

        let mut data = Map::new();
        data.insert("page_query".to_string(), Value::String(query.to_string()));
        self.track("page_view", data).await
    }

    /// Sends a named event. Returns whether the API accepted it.
    pub async fn track(&self, event_name: &str, data: Map<String, Value>) -> bool {
        let page_path = self.current_page().await;
        let event = self.build_event(event_name, data, page_path);

        if !self.enabled {
            tracing::debug!(event_type = %event.event_type, "analytics disabled; event not sent");
            return false;
        }

        match self.client.analytics().track_event(&event).await {
            Ok(ack) => ack.success,
            Err(err) => {
                tracing::debug!(error = %err, event_type = %event.event_type, "analytics tracking failed");
                false
            }
        }
    }

    pub fn build_event(
        &self,
        event_name: &str,
        mut data: Map<String, Value>,
        page_path: Option<String>,
    ) -> AnalyticsEvent {
        for key in RESERVED_KEYS {
            data.remove(key);
        }
        data.insert(
            "client_session_id".to_string(),
            Value::String(self.client_session_id.clone()),
        );

        AnalyticsEvent {
            event_type: event_name.to_string(),
            data,
            page_path,
            timestamp: Some(
                self.clock
                    .now()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FixedClock, RecordingRedirect, RecordingSessionStore, offline_client,
    };
    use serde_json::json;

    fn tracker(enabled: bool, mock_fallback: bool) -> AnalyticsTracker<FixedClock> {
        let client = offline_client(
            &RecordingSessionStore::new(),
            &RecordingRedirect::default(),
            mock_fallback,
        );
        AnalyticsTracker::new(client, FixedClock::at(1_700_000_000), enabled)
    }

    #[test]
    fn when_event_is_built_then_reserved_keys_cannot_be_overridden() {
        let tracker = tracker(true, true);
        let mut data = Map::new();
        data.insert("event_type".to_string(), json!("spoofed"));
        data.insert("timestamp".to_string(), json!("yesterday"));
        data.insert("message_length".to_string(), json!(42));

        let event = tracker.build_event("chat_message_sent", data, Some("/search".to_string()));

        assert_eq!(
            serde_json::to_value(&event).expect("serialize"),
            json!({
                "event_type": "chat_message_sent",
                "message_length": 42,
                "client_session_id": tracker.client_session_id(),
                "page_path": "/search",
                "timestamp": "2023-11-14T22:13:20.000Z"
            })
        );
    }

    #[tokio::test]
    async fn when_tracking_offline_with_fallback_then_event_counts_as_accepted() {
        let tracker = tracker(true, true);

        assert!(tracker.track("search_performed", Map::new()).await);
    }

    #[tokio::test]
    async fn when_tracking_offline_without_fallback_then_failure_is_swallowed() {
        let tracker = tracker(true, false);

        assert!(!tracker.track("search_performed", Map::new()).await);
    }

    #[tokio::test]
    async fn when_analytics_is_disabled_then_nothing_is_sent() {
        let tracker = tracker(false, true);

        assert!(!tracker.page_view("/trending", "").await);
    }

    #[tokio::test]
    async fn when_page_view_is_tracked_then_later_events_carry_the_path() {
        let tracker = tracker(false, true);

        tracker.page_view("/moodboard", "tab=saved").await;

        assert_eq!(tracker.current_page().await.as_deref(), Some("/moodboard"));
    }

    #[test]
    fn when_two_trackers_are_created_then_session_ids_differ() {
        assert_ne!(
            tracker(true, true).client_session_id(),
            tracker(true, true).client_session_id()
        );
    }
}
