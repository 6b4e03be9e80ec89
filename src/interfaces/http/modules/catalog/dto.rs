//! Catalog DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{RestaurantDetail, TopPage};
use crate::domain::{AuthoredReview, Category, Restaurant};
use crate::interfaces::http::common::PaginatedResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDto {
    pub id: i32,
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
    pub created_at: DateTime<Utc>,
}

impl From<Restaurant> for RestaurantDto {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image: r.image,
            description: r.description,
            price_lower: r.price_lower,
            price_upper: r.price_upper,
            opening_time: r.opening_time,
            closing_day: r.closing_day,
            address: r.address,
            phone_number: r.phone_number,
            category_id: r.category_id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopPageResponse {
    pub categories: Vec<CategoryDto>,
    pub newest: Vec<RestaurantDto>,
}

impl From<TopPage> for TopPageResponse {
    fn from(page: TopPage) -> Self {
        Self {
            categories: page.categories.into_iter().map(Into::into).collect(),
            newest: page.newest.into_iter().map(Into::into).collect(),
        }
    }
}

/// Listing parameters; unknown or blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Substring of the name or address
    pub keyword: Option<String>,
    /// Category id
    pub category: Option<String>,
    /// `price_asc`, `price_desc`; anything else sorts newest first
    pub order: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantListResponse {
    pub restaurants: PaginatedResponse<RestaurantDto>,
    pub keyword: Option<String>,
    pub category_id: Option<i32>,
    pub order: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub author: String,
    pub score: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<AuthoredReview> for ReviewDto {
    fn from(r: AuthoredReview) -> Self {
        Self {
            id: r.review.id,
            author: r.author,
            score: r.review.score,
            comment: r.review.comment,
            created_at: r.review.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetailResponse {
    pub restaurant: RestaurantDto,
    pub category: Option<CategoryDto>,
    /// Newest first
    pub reviews: Vec<ReviewDto>,
    /// Only present for signed-in requesters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl From<RestaurantDetail> for RestaurantDetailResponse {
    fn from(d: RestaurantDetail) -> Self {
        Self {
            restaurant: d.restaurant.into(),
            category: d.category.map(Into::into),
            reviews: d.reviews.into_iter().map(Into::into).collect(),
            is_favorite: d.is_favorite,
        }
    }
}
