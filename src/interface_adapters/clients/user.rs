use super::api::{ApiClient, Endpoint};
use crate::domain::{ApiError, UserProfile};
use crate::interface_adapters::mocks;
use crate::interface_adapters::protocol::{
    Ack, AuthResponse, Favorites, LoginRequest, ProductRef, ProfileUpdate, SignupRequest,
};

pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a session token.
    ///
    /// A 401 here means bad credentials and maps to `InvalidCredentials`
    /// without touching the stored session. With mock fallback on, an
    /// unreachable API still accepts the demo account and nothing else.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let endpoint = Endpoint::post("user.login", &["api", "user", "login"]).public();
        let result = self
            .client
            .send::<AuthResponse, _>(&endpoint, &LoginRequest { email, password })
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(ApiError::Upstream { status: 401, .. }) => Err(ApiError::InvalidCredentials),
            Err(err) if self.client.mock_fallback() && err.is_substitutable() => {
                tracing::warn!(error = %err, "login failed upstream; checking demo credentials");
                mocks::demo_login(email, password).ok_or(ApiError::InvalidCredentials)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let endpoint = Endpoint::post("user.signup", &["api", "user", "signup"]).public();
        let result = match self.client.send(&endpoint, request).await {
            Err(ApiError::Upstream { status: 401, .. }) => Err(ApiError::InvalidCredentials),
            other => other,
        };
        self.client.or_mock(&endpoint, result, || {
            mocks::signup(&request.name, &request.email)
        })
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let endpoint = Endpoint::get("user.profile", &["api", "user", "profile"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::put("user.update_profile", &["api", "user", "profile"]);
        let result = self.client.send(&endpoint, update).await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }

    pub async fn favorites(&self) -> Result<Favorites, ApiError> {
        let endpoint = Endpoint::get("user.favorites", &["api", "user", "favorites"]);
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::favorites)
    }

    pub async fn add_favorite(&self, product_id: &str) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::post("user.add_favorite", &["api", "user", "favorites"]);
        let result = self
            .client
            .send(&endpoint, &ProductRef { product_id })
            .await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }

    pub async fn remove_favorite(&self, product_id: &str) -> Result<Ack, ApiError> {
        let endpoint = Endpoint::delete(
            "user.remove_favorite",
            &["api", "user", "favorites", product_id],
        );
        let result = self.client.fetch(&endpoint).await;
        self.client.or_mock(&endpoint, result, mocks::ack)
    }
}
