use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::domain::{ApiError, LoginRedirect, SessionStore};
use crate::interface_adapters::protocol::ErrorBody;

// Timeout bucket a call belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallClass {
    // Health checks: fail fast.
    Probe,
    Standard,
    // Search and AI calls, which may take a while server-side.
    Extended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub probe: Duration,
    pub standard: Duration,
    pub extended: Duration,
}

impl Timeouts {
    pub fn for_class(&self, class: CallClass) -> Duration {
        match class {
            CallClass::Probe => self.probe,
            CallClass::Standard => self.standard,
            CallClass::Extended => self.extended,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(3),
            standard: Duration::from_secs(10),
            extended: Duration::from_secs(30),
        }
    }
}

// Settings the client needs; built from `ClientConfig` by the framework layer.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub base_url: Url,
    pub timeouts: Timeouts,
    // Substitute canned payloads for failed calls instead of surfacing the error.
    pub mock_fallback: bool,
}

// One API operation: where it lives and how it is called.
#[derive(Clone, Debug)]
pub(crate) struct Endpoint {
    pub operation: &'static str,
    pub method: Method,
    pub segments: Vec<String>,
    pub class: CallClass,
    // Public endpoints (login/signup) treat 401 as a plain failure, not an expired session.
    pub public: bool,
}

impl Endpoint {
    fn new(operation: &'static str, method: Method, segments: &[&str]) -> Self {
        Self {
            operation,
            method,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            class: CallClass::Standard,
            public: false,
        }
    }

    pub fn get(operation: &'static str, segments: &[&str]) -> Self {
        Self::new(operation, Method::GET, segments)
    }

    pub fn post(operation: &'static str, segments: &[&str]) -> Self {
        Self::new(operation, Method::POST, segments)
    }

    pub fn put(operation: &'static str, segments: &[&str]) -> Self {
        Self::new(operation, Method::PUT, segments)
    }

    pub fn delete(operation: &'static str, segments: &[&str]) -> Self {
        Self::new(operation, Method::DELETE, segments)
    }

    pub fn class(mut self, class: CallClass) -> Self {
        self.class = class;
        self
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

/// Client for the fashion-discovery API.
///
/// Every call attaches the stored bearer token (if any), runs under the
/// timeout of its call class and, when mock fallback is enabled, degrades
/// to a canned payload instead of failing. A 401 from an authenticated
/// endpoint clears the session and triggers the login redirect.
///
/// Cloning is cheap; clones share the HTTP pool and the session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    options: ClientOptions,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl ApiClient {
    pub fn new(
        options: ClientOptions,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                options,
                session,
                redirect,
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.options.base_url
    }

    pub fn mock_fallback(&self) -> bool {
        self.inner.options.mock_fallback
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// Returns true when `GET /health` answers with a 2xx inside the probe timeout.
    pub async fn is_api_available(&self) -> bool {
        let endpoint = Endpoint::get("health", &["health"])
            .class(CallClass::Probe)
            .public();
        match self.probe(&endpoint).await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "api health check failed");
                false
            }
        }
    }

    pub(crate) async fn fetch<T>(&self, endpoint: &Endpoint) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let builder = self.prepare(endpoint).await?;
        self.dispatch(endpoint, builder).await
    }

    pub(crate) async fn fetch_with_query<T, Q>(
        &self,
        endpoint: &Endpoint,
        query: &Q,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.prepare(endpoint).await?.query(query);
        self.dispatch(endpoint, builder).await
    }

    pub(crate) async fn send<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.prepare(endpoint).await?.json(body);
        self.dispatch(endpoint, builder).await
    }

    // Swap a failed result for the endpoint's mock payload when the fallback is on.
    // 401s and caller-side errors always pass through untouched.
    pub(crate) fn or_mock<T>(
        &self,
        endpoint: &Endpoint,
        result: Result<T, ApiError>,
        mock: impl FnOnce() -> T,
    ) -> Result<T, ApiError> {
        match result {
            Err(err) if self.inner.options.mock_fallback && err.is_substitutable() => {
                tracing::warn!(
                    operation = endpoint.operation,
                    error = %err,
                    "api call failed; substituting mock response"
                );
                Ok(mock())
            }
            other => other,
        }
    }

    fn url_for(&self, segments: &[String]) -> Result<Url, ApiError> {
        let mut url = self.inner.options.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.options.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn current_token(&self) -> Option<String> {
        match self.inner.session.token().await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read session token; sending anonymously");
                None
            }
        }
    }

    async fn prepare(&self, endpoint: &Endpoint) -> Result<RequestBuilder, ApiError> {
        let url = self.url_for(&endpoint.segments)?;
        let timeout = self.inner.options.timeouts.for_class(endpoint.class);
        let mut builder = self
            .inner
            .http
            .request(endpoint.method.clone(), url)
            .timeout(timeout);
        if let Some(token) = self.current_token().await {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    #[tracing::instrument(
        name = "api_call",
        skip_all,
        fields(operation = endpoint.operation, method = %endpoint.method)
    )]
    async fn dispatch<T>(&self, endpoint: &Endpoint, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.exchange(endpoint, builder).await?;
        let timeout = self.inner.options.timeouts.for_class(endpoint.class);
        response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Timeout(timeout)
            } else {
                ApiError::Decode(err.to_string())
            }
        })
    }

    #[tracing::instrument(
        name = "api_probe",
        skip_all,
        fields(operation = endpoint.operation)
    )]
    async fn probe(&self, endpoint: &Endpoint) -> Result<(), ApiError> {
        let builder = self.prepare(endpoint).await?;
        self.exchange(endpoint, builder).await.map(|_| ())
    }

    // Send the request and map the status line; the body is left for the caller.
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let timeout = self.inner.options.timeouts.for_class(endpoint.class);
        tracing::debug!(?timeout, "dispatching api request");

        let response = builder
            .send()
            .await
            .map_err(|err| classify_transport(err, timeout))?;
        let status = response.status();
        tracing::debug!(%status, "api responded");

        if status == StatusCode::UNAUTHORIZED && !endpoint.public {
            self.expire_session().await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            // Keep the upstream message for logs; the body shape is not guaranteed.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message);
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn expire_session(&self) {
        if let Err(err) = self.inner.session.clear().await {
            tracing::warn!(error = %err, "failed to clear session after 401");
        }
        tracing::info!("session rejected by api; redirecting to login");
        self.inner.redirect.redirect_to_login();
    }
}

fn classify_transport(err: reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(timeout)
    } else if err.is_builder() {
        ApiError::InvalidUrl(err.to_string())
    } else {
        ApiError::Unreachable(err)
    }
}
