//! Engagement DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ReviewForm;

#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreChoice {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewFormResponse {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub score_choices: Vec<ScoreChoice>,
    pub default_score: u8,
}

impl From<ReviewForm> for ReviewFormResponse {
    fn from(form: ReviewForm) -> Self {
        Self {
            restaurant_id: form.restaurant.id,
            restaurant_name: form.restaurant.name,
            score_choices: form
                .score_choices
                .into_iter()
                .map(|(value, label)| ScoreChoice { value, label })
                .collect(),
            default_score: form.default_score,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    /// 1..=5, defaults to 3
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: Option<u8>,
    #[validate(length(min = 1, message = "comment is required"))]
    pub comment: String,
}
