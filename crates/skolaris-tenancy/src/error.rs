//! Tenancy error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use skolaris_core::error::SkolarisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenancyError {
    #[error("no organization registered for subdomain '{subdomain}'")]
    OrganizationNotFound { subdomain: String },

    #[error("subscription cancelled for subdomain '{subdomain}'")]
    SubscriptionCancelled { subdomain: String },

    /// Membership denial. Deliberately carries no detail — the audit
    /// log gets the tenant ids, the client does not.
    #[error("forbidden")]
    Forbidden,

    #[error("directory lookup failed: {0}")]
    Directory(#[from] SkolarisError),
}

impl IntoResponse for TenancyError {
    fn into_response(self) -> Response {
        match self {
            TenancyError::OrganizationNotFound { subdomain } => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Organization not found", "subdomain": subdomain})),
            )
                .into_response(),
            TenancyError::SubscriptionCancelled { subdomain } => (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Subscription cancelled", "subdomain": subdomain})),
            )
                .into_response(),
            TenancyError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Forbidden"})),
            )
                .into_response(),
            TenancyError::Directory(err) => {
                tracing::error!(error = %err, "tenant directory failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
