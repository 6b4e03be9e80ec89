//! Restaurant domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    /// Relative path of the uploaded image, if any
    pub image: Option<String>,
    pub description: String,
    pub price_lower: u32,
    pub price_upper: u32,
    pub opening_time: String,
    pub closing_day: String,
    pub address: String,
    pub phone_number: String,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable restaurant fields (admin create / update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantInput {
    pub name: String,
    pub image: Option<String>,
    pub description: String,
    pub price_lower: u32,
    pub price_upper: u32,
    pub opening_time: String,
    pub closing_day: String,
    pub address: String,
    pub phone_number: String,
    pub category_id: i32,
}

impl RestaurantInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Restaurant name must not be empty".into()));
        }
        if self.price_lower > self.price_upper {
            return Err(DomainError::Validation(format!(
                "price_lower ({}) must not exceed price_upper ({})",
                self.price_lower, self.price_upper
            )));
        }
        Ok(())
    }
}
