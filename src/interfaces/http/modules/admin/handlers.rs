//! Catalog administration handlers (staff only)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CategoryRequest, RestaurantRequest};
use crate::application::CatalogService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::catalog::{CategoryDto, RestaurantDto};

#[derive(Clone)]
pub struct AdminState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDto>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn create_category(
    State(state): State<AdminState>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>), ApiError> {
    let category = state.catalog.create_category(&request.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category.into()))))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn update_category(
    State(state): State<AdminState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state.catalog.update_category(id, &request.name).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Deleting a category removes its restaurants too.
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn delete_category(
    State(state): State<AdminState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/restaurants",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = ApiResponse<RestaurantDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_restaurant(
    State(state): State<AdminState>,
    ValidatedJson(request): ValidatedJson<RestaurantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RestaurantDto>>), ApiError> {
    let restaurant = state.catalog.create_restaurant(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(restaurant.into()))))
}

#[utoipa::path(
    put,
    path = "/admin/restaurants/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = ApiResponse<RestaurantDto>),
        (status = 404, description = "Unknown restaurant"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_restaurant(
    State(state): State<AdminState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RestaurantRequest>,
) -> Result<Json<ApiResponse<RestaurantDto>>, ApiError> {
    let restaurant = state.catalog.update_restaurant(id, request.into()).await?;
    Ok(Json(ApiResponse::success(restaurant.into())))
}

#[utoipa::path(
    delete,
    path = "/admin/restaurants/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 404, description = "Unknown restaurant")
    )
)]
pub async fn delete_restaurant(
    State(state): State<AdminState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_restaurant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
