//! Skolaris Core — domain models, error taxonomy, repository traits, and
//! the per-request tenant context shared across all crates.

pub mod context;
pub mod error;
pub mod models;
pub mod repository;

pub use context::{DEFAULT_TENANT_ID, DeploymentMode, TenantContext};
pub use error::{SkolarisError, SkolarisResult};
