//! HTTP mapping for domain errors surfaced by handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use skolaris_core::error::SkolarisError;

/// Handler-level error wrapper so `?` works on repository calls.
pub struct ApiError(pub SkolarisError);

impl From<SkolarisError> for ApiError {
    fn from(err: SkolarisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SkolarisError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            // A tenant-scoped operation reached the data layer without
            // a context. The middleware should have denied earlier, so
            // answer exactly like the membership check does.
            SkolarisError::TenantContext => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            SkolarisError::Database(_) => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
