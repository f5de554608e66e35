//! # Bearer Authorization
//!
//! Static shared-secret check guarding the lookup route. There is no session
//! and no per-caller identity: the token either equals `API_SECRET_TOKEN` or
//! the request stops here.

use crate::handlers::{ClientError, LookupResponse};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

const BEARER_PREFIX: &str = "Bearer ";

/// Check the `Authorization` header against the configured secret.
///
/// The prefix match is case-sensitive. The token is the second
/// space-separated segment of the header value, compared byte for byte.
pub fn authorize(headers: &HeaderMap, secret: &str) -> Result<(), ClientError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with(BEARER_PREFIX))
        .ok_or(ClientError::MissingToken)?;

    let token = header.split(' ').nth(1).unwrap_or_default();
    if token != secret {
        return Err(ClientError::InvalidToken);
    }

    Ok(())
}

/// Middleware wrapper around [`authorize`]
pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match authorize(request.headers(), &state.config.api_secret_token) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            warn!("Rejected request: {:?}", rejection);
            LookupResponse::ClientError(rejection).into_response()
        }
    }
}
