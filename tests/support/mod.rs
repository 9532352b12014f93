// Shared fixtures for integration tests: a stub backend and counting fakes.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use url::Url;

use lookbook_client::{
    ApiClient, LoginRedirect, SessionStore,
    domain::UserProfile,
    interface_adapters::{
        clients::{ClientOptions, Timeouts},
        mocks::{DEMO_EMAIL, DEMO_PASSWORD},
        state::InMemorySessionStore,
    },
};

// Token the stub hands out on a successful login and accepts on protected routes.
pub const GOOD_TOKEN: &str = "stub-token-1";

// Requests the stub has seen, keyed by path, with the Authorization header if any.
#[derive(Clone, Default)]
pub struct Recorded {
    calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl Recorded {
    fn push(&self, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls
            .lock()
            .expect("recorded lock")
            .push((path.to_string(), auth));
    }

    // Authorization header of the last call to `path`; outer None means no call.
    pub fn auth_for(&self, path: &str) -> Option<Option<String>> {
        self.calls
            .lock()
            .expect("recorded lock")
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, auth)| auth.clone())
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .expect("recorded lock")
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
        .into_response()
}

pub fn stub_user() -> Value {
    json!({
        "id": "u-42",
        "name": "Ada",
        "email": DEMO_EMAIL,
        "isPro": false,
        "created_at": "2024-03-01T10:00:00Z"
    })
}

async fn health(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    rec.push("/health", &headers);
    Json(json!({ "status": "healthy" }))
}

async fn text_search(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    rec.push("/api/search/text", &headers);
    Json(json!({
        "products": [{
            "id": "p-1",
            "title": "Linen midi dress",
            "price": 89.0,
            "brand_tier": "premium",
            "colors": ["ecru", "sage"]
        }],
        "total_count": 1,
        "search_time": 0.02,
        "page": 2
    }))
}

async fn login(State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    rec.push("/api/user/login", &headers);
    if body["email"] == DEMO_EMAIL && body["password"] == DEMO_PASSWORD {
        Json(json!({ "token": GOOD_TOKEN, "user": stub_user() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn like(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    rec.push("/api/products/like", &headers);
    Json(json!({ "message": "liked" }))
}

async fn profile(State(rec): State<Recorded>, headers: HeaderMap) -> Response {
    rec.push("/api/user/profile", &headers);
    if authorized(&headers) {
        Json(stub_user()).into_response()
    } else {
        unauthorized()
    }
}

async fn favorites(State(rec): State<Recorded>, headers: HeaderMap) -> Response {
    rec.push("/api/user/favorites", &headers);
    if authorized(&headers) {
        Json(json!({ "favorites": [] })).into_response()
    } else {
        unauthorized()
    }
}

async fn trending(State(rec): State<Recorded>, headers: HeaderMap) -> Response {
    rec.push("/api/products/trending", &headers);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "catalog unavailable" })),
    )
        .into_response()
}

async fn product(
    State(rec): State<Recorded>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    rec.push(&format!("/api/products/{id}"), &headers);
    if id == "slow" {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    Json(json!({ "id": id, "title": "Wool coat", "price": 240.0 }))
}

async fn search_trends(State(rec): State<Recorded>, headers: HeaderMap) -> &'static str {
    rec.push("/api/analytics/search_trends", &headers);
    "<html>maintenance</html>"
}

// Spawn the stub backend on an ephemeral port and return its base URL.
pub async fn spawn_backend() -> (Url, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/search/text", post(text_search))
        .route("/api/user/login", post(login))
        .route("/api/user/profile", get(profile))
        .route("/api/user/favorites", get(favorites))
        .route("/api/products/trending", get(trending))
        .route("/api/products/like", post(like))
        .route("/api/products/{id}", get(product))
        .route("/api/analytics/search_trends", get(search_trends))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend failed");
    });

    let url = Url::parse(&format!("http://{addr}")).expect("valid stub url");
    (url, recorded)
}

// Base URL for a port that was just released, so connections are refused.
pub fn unreachable_base_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("valid url")
}

// Session store that counts clears on top of the in-memory adapter.
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: InMemorySessionStore,
    clears: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            inner: InMemorySessionStore::with_token(token),
            clears: Arc::default(),
        }
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for CountingStore {
    async fn token(&self) -> Result<Option<String>, String> {
        self.inner.token().await
    }

    async fn set_token(&self, token: String) -> Result<(), String> {
        self.inner.set_token(token).await
    }

    async fn profile(&self) -> Result<Option<UserProfile>, String> {
        self.inner.profile().await
    }

    async fn set_profile(&self, profile: UserProfile) -> Result<(), String> {
        self.inner.set_profile(profile).await
    }

    async fn clear(&self) -> Result<(), String> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }
}

#[derive(Clone, Default)]
pub struct CountingRedirect {
    hits: Arc<AtomicUsize>,
}

impl CountingRedirect {
    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl LoginRedirect for CountingRedirect {
    fn redirect_to_login(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn client_for(
    base_url: Url,
    store: &CountingStore,
    redirect: &CountingRedirect,
    mock_fallback: bool,
) -> ApiClient {
    client_with_timeouts(base_url, store, redirect, mock_fallback, Timeouts::default())
}

pub fn client_with_timeouts(
    base_url: Url,
    store: &CountingStore,
    redirect: &CountingRedirect,
    mock_fallback: bool,
    timeouts: Timeouts,
) -> ApiClient {
    let options = ClientOptions {
        base_url,
        timeouts,
        mock_fallback,
    };
    ApiClient::new(options, Arc::new(store.clone()), Arc::new(redirect.clone()))
        .expect("client should build")
}
