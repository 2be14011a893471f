//! Database-specific error types and conversions.

use skolaris_core::error::SkolarisError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Tenant context required for this operation")]
    MissingTenantContext,
}

impl From<DbError> for SkolarisError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SkolarisError::NotFound { entity, id },
            DbError::MissingTenantContext => SkolarisError::TenantContext,
            other => SkolarisError::Database(other.to_string()),
        }
    }
}
