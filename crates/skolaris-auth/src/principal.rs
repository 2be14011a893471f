//! The authenticated principal and the bearer-token middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::debug;

use crate::config::AuthConfig;
use crate::token::{AccessTokenClaims, decode_access_token};

/// An authenticated identity, derived from a verified access token.
///
/// Carries only what the token proves: who the subject is. Which
/// tenant the subject belongs to is looked up from the user table by
/// the membership check.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Identity-provider stable subject identifier.
    pub subject: String,
    /// Realm the subject authenticated against.
    pub realm: String,
}

impl From<AccessTokenClaims> for Principal {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            subject: claims.sub,
            realm: claims.realm,
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid token"})),
    )
        .into_response()
}

/// Bearer-token authentication middleware.
///
/// A request without an `Authorization` header passes through
/// unauthenticated — tenant-agnostic routes must stay reachable, and
/// the membership check denies tenant-scoped access on its own. A
/// header that is present but malformed or fails verification is
/// rejected with 401.
pub async fn authenticate(
    State(config): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return next.run(request).await;
    };

    let token = match header.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => {
            debug!("malformed Authorization header");
            return unauthorized();
        }
    };

    match decode_access_token(token, &config) {
        Ok(claims) => {
            request.extensions_mut().insert(Principal::from(claims));
            next.run(request).await
        }
        Err(err) => {
            debug!(error = %err, "access token rejected");
            unauthorized()
        }
    }
}
