//! Reservation and billing handlers
//!
//! Reservation routes sit behind the paid-member gate middleware; the
//! service re-checks the flag so a direct call cannot bypass it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};

use super::dto::{
    ConfirmationResponse, CreateReservationRequest, ReservationFormResponse, SettingsResponse,
    SuccessParams,
};
use crate::application::{Gated, MembershipService, PortalRedirect};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{AuthenticatedUser, SETTINGS_PATH};

#[derive(Clone)]
pub struct MembershipHandlerState {
    pub membership: Arc<MembershipService>,
}

#[utoipa::path(
    get,
    path = "/restaurant/{id}/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Reservation form context", body = ApiResponse<ReservationFormResponse>),
        (status = 303, description = "Not signed in, or not a paid member (redirect to /settings)"),
        (status = 404, description = "Unknown restaurant")
    )
)]
pub async fn reservation_form(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    match state.membership.reservation_form(user.account_id, id).await? {
        Gated::Allowed(form) => {
            let body: ReservationFormResponse = form.into();
            Ok(Json(ApiResponse::success(body)).into_response())
        }
        Gated::MembershipRequired => Ok(Redirect::to(SETTINGS_PATH).into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/restaurant/{id}/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = CreateReservationRequest,
    responses(
        (status = 303, description = "Reservation created (redirect to /), or membership required (redirect to /settings)"),
        (status = 404, description = "Unknown restaurant"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_reservation(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<Redirect, ApiError> {
    let outcome = state
        .membership
        .create_reservation(
            user.account_id,
            id,
            request.reservation_date,
            request.number_of_people,
        )
        .await?;

    Ok(match outcome {
        Gated::Allowed(_) => Redirect::to("/"),
        Gated::MembershipRequired => Redirect::to(SETTINGS_PATH),
    })
}

#[utoipa::path(
    get,
    path = "/settings",
    tag = "Membership",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Membership status", body = ApiResponse<SettingsResponse>))
)]
pub async fn settings(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let view = state.membership.settings(user.account_id).await?;
    Ok(Json(ApiResponse::success(view.into())))
}

#[utoipa::path(
    post,
    path = "/checkout",
    tag = "Membership",
    security(("bearer_auth" = [])),
    responses(
        (status = 303, description = "Redirect to the hosted checkout page"),
        (status = 502, description = "Billing provider error"),
        (status = 503, description = "Billing not configured")
    )
)]
pub async fn checkout(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Redirect, ApiError> {
    let url = state.membership.start_checkout(user.account_id).await?;
    Ok(Redirect::to(&url))
}

#[utoipa::path(
    get,
    path = "/success",
    tag = "Membership",
    security(("bearer_auth" = [])),
    params(SuccessParams),
    responses(
        (status = 200, description = "Membership activated", body = ApiResponse<ConfirmationResponse>),
        (status = 400, description = "session_id missing"),
        (status = 402, description = "Checkout session not complete"),
        (status = 403, description = "Checkout session belongs to another account"),
        (status = 502, description = "Billing provider error")
    )
)]
pub async fn checkout_success(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<SuccessParams>,
) -> Result<Json<ApiResponse<ConfirmationResponse>>, ApiError> {
    let account = state
        .membership
        .confirm_checkout(user.account_id, params.session_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(ConfirmationResponse {
        is_paid: account.is_paid,
    })))
}

#[utoipa::path(
    post,
    path = "/portal",
    tag = "Membership",
    security(("bearer_auth" = [])),
    responses(
        (status = 303, description = "Redirect to the billing portal, or to /settings without a billing customer"),
        (status = 502, description = "Billing provider error")
    )
)]
pub async fn portal(
    State(state): State<MembershipHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Redirect, ApiError> {
    Ok(match state.membership.portal(user.account_id).await? {
        PortalRedirect::Provider(url) => Redirect::to(&url),
        PortalRedirect::Settings => Redirect::to(SETTINGS_PATH),
    })
}
