use std::time::Duration;
use thiserror::Error;

// Failures a remote call can end in before mock substitution is considered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("api request timed out after {0:?}")]
    Timeout(Duration),

    #[error("api returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    #[error("unauthorized; session cleared")]
    Unauthorized,

    #[error("api response decode error: {0}")]
    Decode(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// Failures of the session use cases: either the call failed or local storage did.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session storage failure: {0}")]
    Storage(String),
}

impl ApiError {
    // Only transport-level and upstream failures may be papered over with mock data.
    pub fn is_substitutable(&self) -> bool {
        matches!(
            self,
            ApiError::Unreachable(_)
                | ApiError::Timeout(_)
                | ApiError::Upstream { .. }
                | ApiError::Decode(_)
        )
    }
}
