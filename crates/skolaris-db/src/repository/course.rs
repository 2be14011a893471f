//! SurrealDB implementation of [`CourseRepository`] — tenant-scoped.
//!
//! Same filtering discipline as the student repository: the
//! [`TenantFilter`] supplies the tenant constraint on every operation.

use chrono::{DateTime, Utc};
use skolaris_core::error::SkolarisResult;
use skolaris_core::models::course::{Course, CreateCourse};
use skolaris_core::repository::{CourseRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::{ReadScope, TenantFilter};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct CourseRow {
    tenant_id: String,
    code: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct CourseRowWithId {
    record_id: String,
    tenant_id: String,
    code: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self, id: Uuid) -> Result<Course, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Course {
            id,
            tenant_id,
            code: self.code,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CourseRowWithId {
    fn try_into_course(self) -> Result<Course, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Course {
            id,
            tenant_id,
            code: self.code,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Course repository.
pub struct SurrealCourseRepository<C: Connection> {
    db: Surreal<C>,
    filter: TenantFilter,
}

// Manual impl: `Surreal<C>` is `Clone` for any engine, so no `C: Clone`
// bound is needed (a derive would add one).
impl<C: Connection> Clone for SurrealCourseRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            filter: self.filter,
        }
    }
}

impl<C: Connection> SurrealCourseRepository<C> {
    pub fn new(db: Surreal<C>, filter: TenantFilter) -> Self {
        Self { db, filter }
    }
}

impl<C: Connection> CourseRepository for SurrealCourseRepository<C> {
    async fn create(&self, input: CreateCourse) -> SkolarisResult<Course> {
        let tenant_id = self.filter.write_tenant()?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('course', $id) SET \
                 tenant_id = $tenant_id, code = $code, title = $title",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("code", input.code))
            .bind(("title", input.title))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<CourseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "course".into(),
            id: id_str,
        })?;

        Ok(row.into_course(id)?)
    }

    async fn get_by_code(&self, code: &str) -> SkolarisResult<Course> {
        let code_owned = code.to_string();
        let not_found = || DbError::NotFound {
            entity: "course".into(),
            id: code_owned.clone(),
        };

        let query = match self.filter.read_scope() {
            // Fail closed: no context, no course.
            ReadScope::DenyAll => return Err(not_found().into()),
            ReadScope::Tenant(tenant_id) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * \
                     FROM course \
                     WHERE code = $code AND tenant_id = $tenant_id",
                )
                .bind(("code", code_owned.clone()))
                .bind(("tenant_id", tenant_id.to_string())),
            ReadScope::Unrestricted => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * \
                     FROM course \
                     WHERE code = $code",
                )
                .bind(("code", code_owned.clone())),
        };

        let mut result = query.await.map_err(DbError::from)?;
        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(not_found)?;

        Ok(row.try_into_course()?)
    }

    async fn list(&self, pagination: Pagination) -> SkolarisResult<PaginatedResult<Course>> {
        let scope = match self.filter.read_scope() {
            ReadScope::DenyAll => return Ok(PaginatedResult::empty(&pagination)),
            scope => scope,
        };

        let (count_query, list_query) = match scope {
            ReadScope::Tenant(_) => (
                "SELECT count() AS total FROM course \
                 WHERE tenant_id = $tenant_id GROUP ALL",
                "SELECT meta::id(id) AS record_id, * \
                 FROM course \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY code ASC \
                 LIMIT $limit START $offset",
            ),
            _ => (
                "SELECT count() AS total FROM course GROUP ALL",
                "SELECT meta::id(id) AS record_id, * \
                 FROM course \
                 ORDER BY code ASC \
                 LIMIT $limit START $offset",
            ),
        };

        let mut count_builder = self.db.query(count_query);
        let mut list_builder = self
            .db
            .query(list_query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));

        if let ReadScope::Tenant(tenant_id) = scope {
            count_builder = count_builder.bind(("tenant_id", tenant_id.to_string()));
            list_builder = list_builder.bind(("tenant_id", tenant_id.to_string()));
        }

        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = list_builder.await.map_err(DbError::from)?;
        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_course())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
