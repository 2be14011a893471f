//! SurrealDB-backed implementations of the tenancy lookup seams.
//!
//! Thin adapters over the global-scope repositories so the middleware
//! can hold `Arc<dyn TenantDirectory>` / `Arc<dyn SubjectDirectory>`
//! without knowing about SurrealDB.

use async_trait::async_trait;
use skolaris_core::error::SkolarisResult;
use skolaris_core::models::tenant::Tenant;
use skolaris_core::repository::{TenantRepository, UserRepository};
use skolaris_tenancy::directory::{SubjectDirectory, TenantDirectory};
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::repository::{SurrealTenantRepository, SurrealUserRepository};

/// Subdomain → tenant lookup backed by the tenant table.
#[derive(Clone)]
pub struct SurrealTenantDirectory<C: Connection> {
    tenants: SurrealTenantRepository<C>,
}

impl<C: Connection> SurrealTenantDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            tenants: SurrealTenantRepository::new(db),
        }
    }
}

#[async_trait]
impl<C: Connection> TenantDirectory for SurrealTenantDirectory<C> {
    async fn find_active_by_subdomain(&self, subdomain: &str) -> SkolarisResult<Option<Tenant>> {
        self.tenants.find_active_by_subdomain(subdomain).await
    }
}

/// Subject → owning tenant lookup backed by the user table.
#[derive(Clone)]
pub struct SurrealSubjectDirectory<C: Connection> {
    users: SurrealUserRepository<C>,
}

impl<C: Connection> SurrealSubjectDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            users: SurrealUserRepository::new(db),
        }
    }
}

#[async_trait]
impl<C: Connection> SubjectDirectory for SurrealSubjectDirectory<C> {
    async fn find_tenant_for_subject(&self, subject: &str) -> SkolarisResult<Option<Uuid>> {
        let user = self.users.find_by_subject(subject).await?;
        Ok(user.map(|u| u.tenant_id))
    }
}
