//! Favorite domain entity

use chrono::{DateTime, Utc};

/// Bookmark of a restaurant by an account; unique per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i32,
    pub restaurant_id: i32,
    pub account_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Result of flipping a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }

    pub fn is_favorite(&self) -> bool {
        matches!(self, Self::Added)
    }
}
