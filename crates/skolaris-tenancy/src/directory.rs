//! Lookup seams consumed by the isolation middleware.
//!
//! These are deliberately narrow, object-safe traits so the middleware
//! can hold them behind `Arc<dyn ...>` without being generic over the
//! database layer. Both are pure reads — resolution and membership
//! never mutate.

use async_trait::async_trait;
use skolaris_core::error::SkolarisResult;
use skolaris_core::models::tenant::Tenant;
use uuid::Uuid;

/// Slug → tenant record lookup, restricted to active tenants.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn find_active_by_subdomain(&self, subdomain: &str) -> SkolarisResult<Option<Tenant>>;
}

/// Identity-provider subject → owning tenant lookup, backed by the
/// authoritative user table (never by token claims).
#[async_trait]
pub trait SubjectDirectory: Send + Sync {
    async fn find_tenant_for_subject(&self, subject: &str) -> SkolarisResult<Option<Uuid>>;
}
