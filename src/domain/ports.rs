use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::UserProfile;

// Port for the persisted session: one token key and one cached profile key.
// Each get/set touches a single key and is atomic at that granularity.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn token(&self) -> Result<Option<String>, String>;
    async fn set_token(&self, token: String) -> Result<(), String>;
    async fn profile(&self) -> Result<Option<UserProfile>, String>;
    async fn set_profile(&self, profile: UserProfile) -> Result<(), String>;
    // Drops both the token and the cached profile.
    async fn clear(&self) -> Result<(), String>;
}

// Port for sending the user back to the login view after a 401.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
