//! Error types for the Skolaris system.
//!
//! Deliberately small: the isolation subsystem surfaces resolution and
//! membership failures as HTTP responses at the middleware boundary,
//! so only errors that cross the repository seam live here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkolarisError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Tenant context missing or invalid")]
    TenantContext,

    #[error("Database error: {0}")]
    Database(String),
}

pub type SkolarisResult<T> = Result<T, SkolarisError>;
