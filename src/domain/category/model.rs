//! Category domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// Maximum length of a category name.
pub const CATEGORY_NAME_MAX: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Trimmed, non-empty and bounded.
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Category name must not be empty".into()));
        }
        if name.chars().count() > CATEGORY_NAME_MAX {
            return Err(DomainError::Validation(format!(
                "Category name must be at most {} characters",
                CATEGORY_NAME_MAX
            )));
        }
        Ok(name.to_string())
    }
}
