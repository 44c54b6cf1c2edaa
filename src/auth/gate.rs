//! Per-request authorization gate.
//!
//! Order of checks: session cookie presence, token validity, then the
//! Origin/Host comparison for mutating methods. A deny response is terminal;
//! the calling handler returns it verbatim and business logic never runs.

use axum::{
    http::{
        header::{COOKIE, HOST, ORIGIN},
        HeaderMap, Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use url::Url;

use super::state::{AuthState, ValidateError};

pub const SESSION_COOKIE_NAME: &str = "admin_token";

/// Outcome of the gate for one request. Handlers only ever see this; the raw
/// token stays inside the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Authorized,
    Unauthorized(DenyReason),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    #[error("missing session token")]
    MissingToken,
    #[error("invalid session token")]
    InvalidToken,
    #[error("expired session token")]
    ExpiredToken,
    #[error("origin host does not match request host")]
    CsrfOriginMismatch,
}

impl DenyReason {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::CsrfOriginMismatch => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Decide whether a request is authorized.
///
/// Mutating methods additionally require the `Origin` host, when the header
/// is present at all, to match the `Host` header. An absent `Origin` passes:
/// `SameSite=Strict` on the cookie is what blocks hostile cross-origin
/// submission from compliant clients in that case.
pub async fn authorize(auth: &AuthState, method: &Method, headers: &HeaderMap) -> Decision {
    let Some(token) = extract_session_token(headers) else {
        return Decision::Unauthorized(DenyReason::MissingToken);
    };

    if let Err(err) = auth.sessions().validate(&token).await {
        return Decision::Unauthorized(match err {
            ValidateError::Invalid => DenyReason::InvalidToken,
            ValidateError::Expired => DenyReason::ExpiredToken,
        });
    }

    if is_mutating(method) {
        if let (Some(origin), Some(host)) = (header_str(headers, ORIGIN), header_str(headers, HOST))
        {
            if !origin_matches_host(origin, host) {
                return Decision::Unauthorized(DenyReason::CsrfOriginMismatch);
            }
        }
    }

    Decision::Authorized
}

/// Gate entry point for handlers: `None` means proceed, `Some(response)` is
/// the terminal deny response to return unchanged.
pub async fn require_admin(
    auth: &AuthState,
    method: &Method,
    headers: &HeaderMap,
) -> Option<Response> {
    if auth.misconfigured() {
        error!("admin secret is not configured; refusing auth attempt");
        return Some(misconfigured_response());
    }

    match authorize(auth, method, headers).await {
        Decision::Authorized => None,
        Decision::Unauthorized(reason) => {
            warn!(%method, "request denied: {reason}");
            Some(deny_response(reason))
        }
    }
}

pub(crate) fn misconfigured_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal Server Error"})),
    )
        .into_response()
}

fn deny_response(reason: DenyReason) -> Response {
    let status = reason.status();
    let message = match status {
        StatusCode::FORBIDDEN => "Forbidden",
        _ => "Unauthorized",
    };
    (status, Json(json!({"error": message}))).into_response()
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn header_str(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Compare the `Origin` header's host against the request `Host` header.
///
/// Like a browser's `URL.host`, the port is included only when it is not the
/// scheme default. An unparseable origin counts as a mismatch.
fn origin_matches_host(origin: &str, host: &str) -> bool {
    let Ok(parsed) = Url::parse(origin) else {
        return false;
    };
    let Some(origin_host) = parsed.host_str() else {
        return false;
    };

    let origin_host = match parsed.port() {
        Some(port) => format!("{origin_host}:{port}"),
        None => origin_host.to_string(),
    };

    origin_host == host.trim()
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
