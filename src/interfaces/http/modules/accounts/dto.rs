//! Account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::identity::rules::{
    check_email, check_password, check_username, PASSWORD_MIN, USERNAME_MAX,
};
use crate::application::{AuthResult, MyPage};
use crate::domain::Account;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_paid: bool,
    /// `unpaid`, `checkout_pending` or `paid`
    pub membership: String,
    pub is_staff: bool,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            membership: a.membership_state().to_string(),
            id: a.id,
            username: a.username,
            email: a.email,
            is_paid: a.is_paid,
            is_staff: a.is_staff,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupFormResponse {
    pub username_max_length: usize,
    pub password_min_length: usize,
}

impl Default for SignupFormResponse {
    fn default() -> Self {
        Self {
            username_max_length: USERNAME_MAX,
            password_min_length: PASSWORD_MIN,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(custom(function = "check_username"))]
    pub username: String,
    #[validate(custom(function = "check_email"))]
    pub email: String,
    #[validate(custom(function = "check_password"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "the two password fields didn't match"))]
    pub password_confirmation: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextParam {
    /// Path to continue to after signing in
    pub next: Option<String>,
}

impl NextParam {
    /// Only same-site absolute paths are honoured.
    pub fn local_path(self) -> Option<String> {
        self.next
            .filter(|n| n.starts_with('/') && !n.starts_with("//"))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginFormResponse {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account: AccountDto,
    /// Where the client should continue
    pub next: String,
}

impl LoginResponse {
    pub fn new(auth: AuthResult, next: Option<String>) -> Self {
        Self {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            account: auth.account.into(),
            next: next.unwrap_or_else(|| "/".to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileFormResponse {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "check_username"))]
    pub username: String,
    #[validate(custom(function = "check_email"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyReservationDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub reservation_date: DateTime<Utc>,
    pub number_of_people: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyReviewDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub score: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyFavoriteDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyPageResponse {
    pub account: AccountDto,
    pub reservations: Vec<MyReservationDto>,
    pub reviews: Vec<MyReviewDto>,
    pub favorites: Vec<MyFavoriteDto>,
}

impl From<MyPage> for MyPageResponse {
    fn from(page: MyPage) -> Self {
        Self {
            account: page.account.into(),
            reservations: page
                .reservations
                .into_iter()
                .map(|n| MyReservationDto {
                    id: n.item.id,
                    restaurant_id: n.item.restaurant_id,
                    restaurant_name: n.restaurant_name,
                    reservation_date: n.item.reservation_date,
                    number_of_people: n.item.number_of_people,
                })
                .collect(),
            reviews: page
                .reviews
                .into_iter()
                .map(|n| MyReviewDto {
                    id: n.item.id,
                    restaurant_id: n.item.restaurant_id,
                    restaurant_name: n.restaurant_name,
                    score: n.item.score,
                    comment: n.item.comment,
                    created_at: n.item.created_at,
                })
                .collect(),
            favorites: page
                .favorites
                .into_iter()
                .map(|n| MyFavoriteDto {
                    id: n.item.id,
                    restaurant_id: n.item.restaurant_id,
                    restaurant_name: n.restaurant_name,
                    created_at: n.item.created_at,
                })
                .collect(),
        }
    }
}
