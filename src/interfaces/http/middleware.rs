//! Authentication and capability middleware for Axum
//!
//! - `require_login`: bearer token required; otherwise `303` to `/login?next=<path and query>`
//! - `optional_auth`: attaches the requester when a valid token is presented
//! - `require_staff`: staff role required (`403`)
//! - `require_paid_member`: paid membership required; otherwise `303` to `/settings`

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use urlencoding::encode;

use crate::application::{AccountService, MembershipService};
use crate::infrastructure::crypto::jwt::TokenClaims;

/// Where unpaid members are sent
pub const SETTINGS_PATH: &str = "/settings";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug)]
pub enum AuthError {
    InsufficientPermissions,
    AccountUnavailable,
}

/// Middleware state
#[derive(Clone)]
pub struct AuthState {
    pub accounts: Arc<AccountService>,
    pub membership: Arc<MembershipService>,
}

/// Requester resolved from a valid bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub account_id: i32,
    pub username: String,
    pub role: String,
    /// Token id, revoked on logout
    pub jti: String,
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            account_id: claims.account_id()?,
            username: claims.username,
            role: claims.role,
            jti: claims.jti,
            expires_at: claims.exp,
        })
    }

    pub fn is_staff(&self) -> bool {
        self.role == "staff"
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

fn resolve_user(state: &AuthState, request: &Request<Body>) -> Option<AuthenticatedUser> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)?;

    match state.accounts.authenticate(token) {
        Ok(claims) => AuthenticatedUser::from_claims(claims),
        Err(e) => {
            warn!("Rejected bearer token: {}", e);
            None
        }
    }
}

/// Redirect target for an anonymous request to a login-only route.
///
/// `next` carries the full path and query, so `/success?session_id=...`
/// survives the round trip through the login page.
pub fn login_redirect(uri: &Uri) -> Redirect {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Redirect::to(&format!("{}?next={}", LOGIN_PATH, encode(target)))
}

pub async fn require_login(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = resolve_user(&auth_state, &request) else {
        return login_redirect(request.uri()).into_response();
    };
    request.extensions_mut().insert(user);
    next.run(request).await
}

pub async fn optional_auth(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = resolve_user(&auth_state, &request) {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

/// Must run inside `require_login`.
pub async fn require_staff(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_staff() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => login_redirect(request.uri()).into_response(),
    }
}

/// Paid-membership gate. The flag is re-read from the store on every request,
/// so a token issued before payment still passes once the account is paid.
///
/// Must run inside `require_login`.
pub async fn require_paid_member(
    State(auth_state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(account_id) = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.account_id)
    else {
        return login_redirect(request.uri()).into_response();
    };

    match auth_state.membership.is_paid_member(account_id).await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            metrics::counter!("membership_gate_redirects_total").increment(1);
            Redirect::to(SETTINGS_PATH).into_response()
        }
        Err(e) => {
            error!(account_id, "Membership check failed: {}", e);
            auth_error_response(AuthError::AccountUnavailable)
        }
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        AuthError::AccountUnavailable => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Account could not be loaded")
        }
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}
