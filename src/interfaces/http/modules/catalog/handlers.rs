//! Catalog handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::dto::{
    ListParams, RestaurantDetailResponse, RestaurantDto, RestaurantListResponse, TopPageResponse,
};
use crate::application::CatalogService;
use crate::domain::RestaurantQuery;
use crate::interfaces::http::common::{ApiError, ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Catalog",
    responses(
        (status = 200, description = "Categories and newest restaurants", body = ApiResponse<TopPageResponse>)
    )
)]
pub async fn top_page(
    State(state): State<CatalogState>,
) -> Result<Json<ApiResponse<TopPageResponse>>, ApiError> {
    let page = state.catalog.top_page().await?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Catalog",
    params(ListParams),
    responses(
        (status = 200, description = "One page of matching restaurants", body = ApiResponse<RestaurantListResponse>),
        (status = 404, description = "Page out of range")
    )
)]
pub async fn list_restaurants(
    State(state): State<CatalogState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<RestaurantListResponse>>, ApiError> {
    let query = RestaurantQuery::from_params(
        params.keyword.as_deref(),
        params.category.as_deref(),
        params.order.as_deref(),
    );
    let result = state
        .catalog
        .search(&query, params.page.unwrap_or(1))
        .await?;

    Ok(Json(ApiResponse::success(RestaurantListResponse {
        restaurants: PaginatedResponse::from_result(result, RestaurantDto::from),
        keyword: query.keyword().map(str::to_string),
        category_id: query.category_id(),
        order: query.order.as_param().to_string(),
    })))
}

#[utoipa::path(
    get,
    path = "/restaurant/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant with reviews", body = ApiResponse<RestaurantDetailResponse>),
        (status = 404, description = "Unknown restaurant")
    )
)]
pub async fn restaurant_detail(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
    viewer: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<RestaurantDetailResponse>>, ApiError> {
    let viewer = viewer.map(|Extension(user)| user.account_id);
    let detail = state.catalog.detail(id, viewer).await?;
    Ok(Json(ApiResponse::success(detail.into())))
}
