//! Review and favorite handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Json,
};
use tracing::info;

use super::dto::{CreateReviewRequest, ReviewFormResponse};
use crate::application::EngagementService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct EngagementState {
    pub engagement: Arc<EngagementService>,
}

fn detail_path(restaurant_id: i32) -> String {
    format!("/restaurant/{}", restaurant_id)
}

#[utoipa::path(
    get,
    path = "/restaurant/{id}/review",
    tag = "Engagement",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Review form context", body = ApiResponse<ReviewFormResponse>),
        (status = 303, description = "Not signed in; redirect to /login"),
        (status = 404, description = "Unknown restaurant")
    )
)]
pub async fn review_form(
    State(state): State<EngagementState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReviewFormResponse>>, ApiError> {
    let form = state.engagement.review_form(id).await?;
    Ok(Json(ApiResponse::success(form.into())))
}

#[utoipa::path(
    post,
    path = "/restaurant/{id}/review",
    tag = "Engagement",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = CreateReviewRequest,
    responses(
        (status = 303, description = "Review posted; redirect to the restaurant"),
        (status = 404, description = "Unknown restaurant"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_review(
    State(state): State<EngagementState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<Redirect, ApiError> {
    state
        .engagement
        .create_review(user.account_id, id, request.score, request.comment)
        .await?;
    Ok(Redirect::to(&detail_path(id)))
}

#[utoipa::path(
    post,
    path = "/restaurant/{id}/favorite",
    tag = "Engagement",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 303, description = "Favorite toggled; redirect to the restaurant"),
        (status = 404, description = "Unknown restaurant")
    )
)]
pub async fn toggle_favorite(
    State(state): State<EngagementState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let outcome = state.engagement.toggle_favorite(user.account_id, id).await?;
    info!(
        account_id = user.account_id,
        restaurant_id = id,
        action = outcome.as_str(),
        "Favorite toggled"
    );
    Ok(Redirect::to(&detail_path(id)))
}
