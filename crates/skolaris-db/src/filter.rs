//! The tenant row filter — the structural backstop.
//!
//! Every tenant-scoped repository method asks this filter for its
//! scope before touching the database, so forgetting a manual
//! `WHERE tenant_id = ...` clause is not possible: the predicate is
//! injected in exactly one place.
//!
//! Fail-closed policy: with filtering enabled and no tenant context
//! present, reads return nothing — an empty page, a NotFound — rather
//! than everything. This silent-empty behavior for reads is a
//! deliberate choice (tenant-agnostic code can share the scoped
//! repositories without blowing up), while writes fail loudly with
//! [`DbError::MissingTenantContext`], because a silently dropped write
//! would be unobservable.

use skolaris_core::context::{DEFAULT_TENANT_ID, DeploymentMode};
use skolaris_tenancy::scope;
use uuid::Uuid;

use crate::error::DbError;

/// What a tenant-scoped read is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    /// Filtering disabled (self-hosted): no tenant clause.
    Unrestricted,
    /// Constrain every row to this tenant.
    Tenant(Uuid),
    /// Filtering enabled but no context: match no rows at all.
    DenyAll,
}

/// Process-wide row-filter policy, decided once at startup from the
/// deployment mode and immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct TenantFilter {
    enabled: bool,
}

impl TenantFilter {
    pub fn for_mode(mode: DeploymentMode) -> Self {
        Self {
            enabled: mode == DeploymentMode::SaaS,
        }
    }

    /// Scope for the current flow's reads.
    pub fn read_scope(&self) -> ReadScope {
        if !self.enabled {
            return ReadScope::Unrestricted;
        }
        match scope::current() {
            Some(ctx) => ReadScope::Tenant(ctx.tenant_id),
            None => ReadScope::DenyAll,
        }
    }

    /// The tenant id new and updated rows are constrained to.
    ///
    /// With filtering enabled this is always the current context's
    /// tenant; without a context the write is refused. Self-hosted
    /// installs fall back to the fixed default tenant.
    pub fn write_tenant(&self) -> Result<Uuid, DbError> {
        match scope::current() {
            Some(ctx) => Ok(ctx.tenant_id),
            None if self.enabled => Err(DbError::MissingTenantContext),
            None => Ok(DEFAULT_TENANT_ID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skolaris_core::context::TenantContext;
    use skolaris_core::models::tenant::SubscriptionTier;

    fn ctx(tenant_id: Uuid) -> TenantContext {
        TenantContext {
            tenant_id,
            mode: DeploymentMode::SaaS,
            tier: SubscriptionTier::Free,
        }
    }

    #[tokio::test]
    async fn enabled_with_context_scopes_to_tenant() {
        let filter = TenantFilter::for_mode(DeploymentMode::SaaS);
        let id = Uuid::new_v4();
        let read = scope::with_context(Some(ctx(id)), async move { filter.read_scope() }).await;
        assert_eq!(read, ReadScope::Tenant(id));
    }

    #[tokio::test]
    async fn enabled_without_context_denies_all() {
        let filter = TenantFilter::for_mode(DeploymentMode::SaaS);
        assert_eq!(filter.read_scope(), ReadScope::DenyAll);
        assert!(matches!(
            filter.write_tenant(),
            Err(DbError::MissingTenantContext)
        ));
    }

    #[tokio::test]
    async fn disabled_is_unrestricted() {
        let filter = TenantFilter::for_mode(DeploymentMode::SelfHosted);
        assert_eq!(filter.read_scope(), ReadScope::Unrestricted);
        assert_eq!(filter.write_tenant().unwrap(), DEFAULT_TENANT_ID);
    }
}
