//! Session endpoints for the admin cookie.
//!
//! `GET /auth` answers "is this cookie a live session". `POST /auth` is both
//! login (`{password}`) and logout (`{logout:true}`), mirroring the single
//! credential form the admin surface renders.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, SET_COOKIE},
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::{
    gate::{self, Decision, SESSION_COOKIE_NAME},
    state::AuthConfig,
    verifier,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthRequest {
    /// Login: the candidate admin secret.
    pub password: Option<String>,
    /// Logout: `true` ends the session.
    pub logout: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

#[utoipa::path(
    get,
    path = "/auth",
    responses(
        (status = 200, description = "Session cookie is valid", body = OkResponse),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Admin secret not configured")
    ),
    tag = "auth"
)]
pub async fn session(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if state.auth.misconfigured() {
        error!("admin secret is not configured; refusing session check");
        return gate::misconfigured_response();
    }

    match gate::authorize(&state.auth, &Method::GET, &headers).await {
        Decision::Authorized => ok_response(),
        Decision::Unauthorized(_) => unauthorized(),
    }
}

#[utoipa::path(
    post,
    path = "/auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Login accepted (sets the session cookie) or logout done (clears it)", body = OkResponse),
        (status = 401, description = "Wrong password, no cookie set"),
        (status = 500, description = "Admin secret not configured")
    ),
    tag = "auth"
)]
pub async fn auth(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<AuthRequest>,
) -> Response {
    if state.auth.misconfigured() {
        error!("admin secret is not configured; refusing login");
        return gate::misconfigured_response();
    }

    if payload.logout == Some(true) {
        return logout(&headers, &state).await;
    }

    if let Some(password) = payload.password {
        return login(&password, &state).await;
    }

    unauthorized()
}

async fn login(password: &str, state: &AppState) -> Response {
    if !verifier::verify_secret(password, state.auth.secret()) {
        warn!("login rejected");
        return unauthorized();
    }

    let token = match state.auth.sessions().issue().await {
        Ok(token) => token,
        Err(err) => {
            error!("failed to issue session token: {err}");
            return server_error();
        }
    };

    let Ok(cookie) = session_cookie(state.auth.config(), &token) else {
        error!("failed to build session cookie");
        return server_error();
    };

    info!("admin login accepted");
    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, cookie);
    (StatusCode::OK, response_headers, Json(json!({"ok": true}))).into_response()
}

async fn logout(headers: &HeaderMap, state: &AppState) -> Response {
    if let Some(token) = gate::extract_session_token(headers) {
        state.auth.sessions().revoke(&token).await;
    }

    // Always clear the cookie, even without a presented token.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.auth.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::OK, response_headers, Json(json!({"ok": true}))).into_response()
}

/// Build the `HttpOnly` session cookie. `SameSite=Strict` is part of the
/// CSRF story: it keeps compliant browsers from attaching the cookie to
/// cross-site submissions that carry no `Origin` header.
fn session_cookie(config: &AuthConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age}"
    );
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn ok_response() -> Response {
    (StatusCode::OK, Json(json!({"ok": true}))).into_response()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal Server Error"})),
    )
        .into_response()
}
