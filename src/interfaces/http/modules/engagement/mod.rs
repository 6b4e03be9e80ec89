//! Engagement module: reviews and favorites

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
