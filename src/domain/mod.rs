pub mod entities;
pub mod errors;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use entities::{
    MOODBOARD_IMAGE_LIMIT, Moodboard, MoodboardImage, Product, SearchMode, UserProfile,
};
pub use errors::{ApiError, SessionError};
pub use ports::{Clock, LoginRedirect, SessionStore};
