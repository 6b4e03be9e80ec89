//! Engagement module: reviews and favorites

pub mod service;

pub use service::{EngagementService, ReviewForm};
