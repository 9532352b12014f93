use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::UserProfile;
use crate::domain::ports::{Clock, LoginRedirect, SessionStore};

// Persisted session shape; the key names match what the web client kept in local storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(rename = "auth_token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "user_profile", default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

// In-memory session store adapter.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    pub session: Arc<Mutex<StoredSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session: Arc::new(Mutex::new(StoredSession {
                token: Some(token.into()),
                profile: None,
            })),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn token(&self) -> Result<Option<String>, String> {
        Ok(self.session.lock().await.token.clone())
    }

    async fn set_token(&self, token: String) -> Result<(), String> {
        self.session.lock().await.token = Some(token);
        Ok(())
    }

    async fn profile(&self) -> Result<Option<UserProfile>, String> {
        Ok(self.session.lock().await.profile.clone())
    }

    async fn set_profile(&self, profile: UserProfile) -> Result<(), String> {
        self.session.lock().await.profile = Some(profile);
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        *self.session.lock().await = StoredSession::default();
        Ok(())
    }
}

// JSON-file session store, used by the CLI so a login survives between runs.
// A missing file reads as an empty session.
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn load(&self) -> Result<StoredSession, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(StoredSession::default()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| format!("corrupt session file {}: {err}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoredSession::default()),
            Err(err) => Err(format!("read {}: {err}", self.path.display())),
        }
    }

    async fn store(&self, session: &StoredSession) -> Result<(), String> {
        let bytes = serde_json::to_vec_pretty(session).map_err(|err| err.to_string())?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|err| format!("write {}: {err}", self.path.display()))
    }

    async fn update(&self, apply: impl FnOnce(&mut StoredSession)) -> Result<(), String> {
        let _guard = self.lock.lock().await;
        let mut session = self.load().await?;
        apply(&mut session);
        self.store(&session).await
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn token(&self) -> Result<Option<String>, String> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.token)
    }

    async fn set_token(&self, token: String) -> Result<(), String> {
        self.update(|session| session.token = Some(token)).await
    }

    async fn profile(&self) -> Result<Option<UserProfile>, String> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.profile)
    }

    async fn set_profile(&self, profile: UserProfile) -> Result<(), String> {
        self.update(|session| session.profile = Some(profile)).await
    }

    async fn clear(&self) -> Result<(), String> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("remove {}: {err}", self.path.display())),
        }
    }
}

// Headless stand-in for navigating to the login page: tell the user to sign in again.
#[derive(Clone, Copy, Default)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self) {
        tracing::warn!("session expired or revoked; run `lookbook login` to sign in again");
    }
}

// Wall-clock time source.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
