use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::UserProfile;
use crate::domain::ports::{Clock, LoginRedirect, SessionStore};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().expect("valid timestamp"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub token: bool,
    pub clear: bool,
}

#[derive(Default)]
struct Recorded {
    token: Option<String>,
    profile: Option<UserProfile>,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSessionStore {
    state: Arc<Mutex<Recorded>>,
    clears: Arc<AtomicUsize>,
    failures: FailureFlags,
}

impl RecordingSessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.state.lock().expect("session mutex poisoned").token = Some(token.into());
        store
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub(crate) fn stored_token(&self) -> Option<String> {
        self.state.lock().expect("session mutex poisoned").token.clone()
    }

    pub(crate) fn stored_profile(&self) -> Option<UserProfile> {
        self.state.lock().expect("session mutex poisoned").profile.clone()
    }
}

#[async_trait]
impl SessionStore for RecordingSessionStore {
    async fn token(&self) -> Result<Option<String>, String> {
        if self.failures.token {
            return Err("token read failed".to_string());
        }
        Ok(self.stored_token())
    }

    async fn set_token(&self, token: String) -> Result<(), String> {
        self.state.lock().expect("session mutex poisoned").token = Some(token);
        Ok(())
    }

    async fn profile(&self) -> Result<Option<UserProfile>, String> {
        Ok(self.stored_profile())
    }

    async fn set_profile(&self, profile: UserProfile) -> Result<(), String> {
        self.state.lock().expect("session mutex poisoned").profile = Some(profile);
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        if self.failures.clear {
            return Err("clear failed".to_string());
        }
        let mut guard = self.state.lock().expect("session mutex poisoned");
        guard.token = None;
        guard.profile = None;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRedirect {
    hits: Arc<AtomicUsize>,
}

impl RecordingRedirect {
    pub(crate) fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

// Base URL for a port that was just released, so connections are refused.
pub(crate) fn unreachable_base_url() -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    url::Url::parse(&format!("http://{addr}")).expect("valid url")
}

pub(crate) fn offline_client(
    store: &RecordingSessionStore,
    redirect: &RecordingRedirect,
    mock_fallback: bool,
) -> crate::interface_adapters::clients::ApiClient {
    use crate::interface_adapters::clients::{ApiClient, ClientOptions, Timeouts};

    let options = ClientOptions {
        base_url: unreachable_base_url(),
        timeouts: Timeouts::default(),
        mock_fallback,
    };
    ApiClient::new(options, Arc::new(store.clone()), Arc::new(redirect.clone()))
        .expect("client should build")
}
