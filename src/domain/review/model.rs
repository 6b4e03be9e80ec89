//! Review domain entity

use chrono::{DateTime, Utc};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const DEFAULT_SCORE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub restaurant_id: i32,
    pub account_id: i32,
    /// 1 (★) to 5 (★★★★★)
    pub score: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review together with the username of its author.
#[derive(Debug, Clone)]
pub struct AuthoredReview {
    pub review: Review,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub restaurant_id: i32,
    pub account_id: i32,
    pub score: u8,
    pub comment: String,
}

/// Star label shown next to a score choice.
pub fn score_label(score: u8) -> String {
    "★".repeat(score as usize)
}
