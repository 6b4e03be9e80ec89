//! Admin DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::RestaurantInput;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RestaurantRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price_lower: u32,
    pub price_upper: u32,
    #[serde(default)]
    pub opening_time: String,
    #[serde(default)]
    pub closing_day: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    pub category_id: i32,
}

impl From<RestaurantRequest> for RestaurantInput {
    fn from(r: RestaurantRequest) -> Self {
        Self {
            name: r.name,
            image: r.image.filter(|i| !i.is_empty()),
            description: r.description,
            price_lower: r.price_lower,
            price_upper: r.price_upper,
            opening_time: r.opening_time,
            closing_day: r.closing_day,
            address: r.address,
            phone_number: r.phone_number,
            category_id: r.category_id,
        }
    }
}
