use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::UserProfile;
use crate::domain::errors::{ApiError, SessionError};
use crate::domain::ports::SessionStore;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::protocol::{AuthResponse, SignupRequest};

/// Signed-in state for one application instance.
///
/// Holds the current user in memory and mirrors token and profile into the
/// injected session store, which is the same store the client reads the
/// bearer token from.
pub struct AuthSession {
    client: ApiClient,
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<UserProfile>>,
}

impl AuthSession {
    pub fn new(client: ApiClient) -> Self {
        let store = Arc::clone(client.session());
        Self {
            client,
            store,
            user: RwLock::new(None),
        }
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Rebuilds the session from storage at startup.
    ///
    /// Without a stored token there is no user. With one, the cached profile
    /// is served right away and then refreshed from the API; a failed refresh
    /// drops the session.
    pub async fn restore(&self) -> Option<UserProfile> {
        let token = self.store.token().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read stored token");
            None
        });
        if token.is_none_or(|t| t.is_empty()) {
            *self.user.write().await = None;
            return None;
        }

        let cached = self.store.profile().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read cached profile");
            None
        });
        *self.user.write().await = cached;

        match self.refresh_profile().await {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load user profile; dropping session");
                self.discard(&err).await;
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        let response = self.client.user().login(email, password).await?;
        tracing::info!(user_id = %response.user.id, "login succeeded");
        self.establish(response).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<UserProfile, SessionError> {
        let response = self.client.user().signup(request).await?;
        tracing::info!(user_id = %response.user.id, "signup succeeded");
        self.establish(response).await
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        *self.user.write().await = None;
        self.store.clear().await.map_err(SessionError::Storage)?;
        tracing::info!("logged out");
        Ok(())
    }

    // Persist the new token, then load the profile it grants access to.
    async fn establish(&self, response: AuthResponse) -> Result<UserProfile, SessionError> {
        self.store
            .set_token(response.token)
            .await
            .map_err(SessionError::Storage)?;

        match self.refresh_profile().await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                self.discard(&err).await;
                Err(err)
            }
        }
    }

    async fn refresh_profile(&self) -> Result<UserProfile, SessionError> {
        let profile = self.client.user().profile().await?;
        if let Err(err) = self.store.set_profile(profile.clone()).await {
            tracing::warn!(error = %err, "failed to cache user profile");
        }
        *self.user.write().await = Some(profile.clone());
        Ok(profile)
    }

    // A 401 has already cleared the store inside the client; only the in-memory user remains.
    async fn discard(&self, cause: &SessionError) {
        *self.user.write().await = None;
        if matches!(cause, SessionError::Api(ApiError::Unauthorized)) {
            return;
        }
        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "failed to clear session");
        }
    }
}
