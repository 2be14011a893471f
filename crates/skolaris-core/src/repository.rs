//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories do
//! **not** take a `tenant_id` parameter: the row filter at the data
//! layer injects the current tenant into every query, so call sites
//! cannot forget (or forge) the constraint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SkolarisResult;
use crate::models::{
    course::{Course, CreateCourse},
    student::{CreateStudent, Student, UpdateStudent},
    tenant::{CreateTenant, Tenant, UpdateTenant},
    user::{CreateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    /// An empty page — what tenant-scoped reads return when the row
    /// filter denies all rows.
    pub fn empty(pagination: &Pagination) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Global-scope repositories (not row-filtered)
// ---------------------------------------------------------------------------

/// The tenant directory. Owned by tenant provisioning; resolution only
/// ever reads it.
pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = SkolarisResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SkolarisResult<Tenant>> + Send;
    /// Look up an active tenant by subdomain. Inactive tenants are
    /// invisible to resolution, so `None` covers both "never existed"
    /// and "deactivated".
    fn find_active_by_subdomain(
        &self,
        subdomain: &str,
    ) -> impl Future<Output = SkolarisResult<Option<Tenant>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = SkolarisResult<Tenant>> + Send;
    /// Tenants are never deleted, only deactivated.
    fn deactivate(&self, id: Uuid) -> impl Future<Output = SkolarisResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = SkolarisResult<PaginatedResult<Tenant>>> + Send;
}

/// The authoritative subject → user mapping, keyed by the identity
/// provider's stable subject identifier.
pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = SkolarisResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SkolarisResult<User>> + Send;
    fn find_by_subject(
        &self,
        subject: &str,
    ) -> impl Future<Output = SkolarisResult<Option<User>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories (row-filtered)
// ---------------------------------------------------------------------------

pub trait StudentRepository: Send + Sync {
    /// Create a student stamped with the current tenant. Fails with
    /// `SkolarisError::TenantContext` when filtering is enabled and no
    /// context is present.
    fn create(&self, input: CreateStudent) -> impl Future<Output = SkolarisResult<Student>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SkolarisResult<Student>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateStudent,
    ) -> impl Future<Output = SkolarisResult<Student>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = SkolarisResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = SkolarisResult<PaginatedResult<Student>>> + Send;
}

pub trait CourseRepository: Send + Sync {
    fn create(&self, input: CreateCourse) -> impl Future<Output = SkolarisResult<Course>> + Send;
    fn get_by_code(&self, code: &str) -> impl Future<Output = SkolarisResult<Course>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = SkolarisResult<PaginatedResult<Course>>> + Send;
}
