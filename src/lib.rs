pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{ApiError, LoginRedirect, SessionStore};
pub use frameworks::config::ClientConfig;
pub use interface_adapters::clients::ApiClient;
