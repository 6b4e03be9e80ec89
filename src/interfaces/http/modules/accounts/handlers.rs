//! Account handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Redirect,
    Extension, Json,
};
use tracing::info;

use super::dto::{
    LoginFormResponse, LoginRequest, LoginResponse, MyPageResponse, NextParam,
    ProfileFormResponse, SignupFormResponse, SignupRequest, UpdateProfileRequest,
};
use crate::application::{AccountService, SignupInput};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AccountsState {
    pub accounts: Arc<AccountService>,
}

#[utoipa::path(
    get,
    path = "/signup",
    tag = "Accounts",
    responses((status = 200, description = "Signup form constraints", body = ApiResponse<SignupFormResponse>))
)]
pub async fn signup_form() -> Json<ApiResponse<SignupFormResponse>> {
    Json(ApiResponse::success(SignupFormResponse::default()))
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Accounts",
    request_body = SignupRequest,
    responses(
        (status = 303, description = "Account created; redirect to the top page"),
        (status = 409, description = "Username taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn signup(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Redirect, ApiError> {
    state
        .accounts
        .signup(SignupInput {
            username: request.username,
            email: request.email,
            password: request.password,
            password_confirmation: request.password_confirmation,
        })
        .await?;
    Ok(Redirect::to("/"))
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "Accounts",
    params(NextParam),
    responses((status = 200, description = "Login form context", body = ApiResponse<LoginFormResponse>))
)]
pub async fn login_form(Query(params): Query<NextParam>) -> Json<ApiResponse<LoginFormResponse>> {
    Json(ApiResponse::success(LoginFormResponse {
        next: params.local_path(),
    }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    params(NextParam),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AccountsState>,
    Query(params): Query<NextParam>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .accounts
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(LoginResponse::new(
        auth,
        params.local_path(),
    ))))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses((status = 303, description = "Token revoked; redirect to the top page"))
)]
pub async fn logout(
    State(state): State<AccountsState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Redirect {
    state.accounts.logout(&user.jti, user.expires_at);
    info!(account_id = user.account_id, "Account logged out");
    Redirect::to("/")
}

#[utoipa::path(
    get,
    path = "/mypage",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Reservations, reviews and favorites", body = ApiResponse<MyPageResponse>))
)]
pub async fn my_page(
    State(state): State<AccountsState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<MyPageResponse>>, ApiError> {
    let page = state.accounts.my_page(user.account_id).await?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/mypage/edit",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Current profile values", body = ApiResponse<ProfileFormResponse>))
)]
pub async fn profile_form(
    State(state): State<AccountsState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProfileFormResponse>>, ApiError> {
    let account = state.accounts.profile(user.account_id).await?;
    Ok(Json(ApiResponse::success(ProfileFormResponse {
        username: account.username,
        email: account.email,
    })))
}

#[utoipa::path(
    post,
    path = "/mypage/edit",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 303, description = "Profile updated; redirect to /mypage"),
        (status = 409, description = "Username taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_profile(
    State(state): State<AccountsState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Redirect, ApiError> {
    state
        .accounts
        .update_profile(user.account_id, request.username, request.email)
        .await?;
    Ok(Redirect::to("/mypage"))
}
