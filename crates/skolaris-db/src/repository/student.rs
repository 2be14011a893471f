//! SurrealDB implementation of [`StudentRepository`] — tenant-scoped.
//!
//! No method takes or trusts a caller-supplied tenant id. The
//! [`TenantFilter`] is consulted at the top of every operation:
//! reads under `DenyAll` return nothing (empty page / NotFound)
//! without touching the database; writes without a context are
//! refused outright.

use chrono::{DateTime, Utc};
use skolaris_core::error::SkolarisResult;
use skolaris_core::models::student::{CreateStudent, Student, UpdateStudent};
use skolaris_core::repository::{PaginatedResult, Pagination, StudentRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::{ReadScope, TenantFilter};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct StudentRow {
    tenant_id: String,
    first_name: String,
    last_name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct StudentRowWithId {
    record_id: String,
    tenant_id: String,
    first_name: String,
    last_name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StudentRow {
    fn into_student(self, id: Uuid) -> Result<Student, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Student {
            id,
            tenant_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl StudentRowWithId {
    fn try_into_student(self) -> Result<Student, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Migration(format!("invalid tenant UUID: {e}")))?;
        Ok(Student {
            id,
            tenant_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
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

/// SurrealDB implementation of the Student repository.
pub struct SurrealStudentRepository<C: Connection> {
    db: Surreal<C>,
    filter: TenantFilter,
}

// Manual impl: `Surreal<C>` is `Clone` for any engine, so no `C: Clone`
// bound is needed (a derive would add one).
impl<C: Connection> Clone for SurrealStudentRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            filter: self.filter,
        }
    }
}

impl<C: Connection> SurrealStudentRepository<C> {
    pub fn new(db: Surreal<C>, filter: TenantFilter) -> Self {
        Self { db, filter }
    }

    fn not_found(id: Uuid) -> DbError {
        DbError::NotFound {
            entity: "student".into(),
            id: id.to_string(),
        }
    }
}

impl<C: Connection> StudentRepository for SurrealStudentRepository<C> {
    async fn create(&self, input: CreateStudent) -> SkolarisResult<Student> {
        // The tenant stamp comes from the filter, never from input.
        let tenant_id = self.filter.write_tenant()?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('student', $id) SET \
                 tenant_id = $tenant_id, \
                 first_name = $first_name, last_name = $last_name, \
                 email = $email",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<StudentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "student".into(),
            id: id_str,
        })?;

        Ok(row.into_student(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SkolarisResult<Student> {
        let query = match self.filter.read_scope() {
            // Fail closed: no context means the row does not exist
            // from this flow's point of view.
            ReadScope::DenyAll => return Err(Self::not_found(id).into()),
            ReadScope::Tenant(tenant_id) => self
                .db
                .query(
                    "SELECT * FROM type::record('student', $id) \
                     WHERE tenant_id = $tenant_id",
                )
                .bind(("id", id.to_string()))
                .bind(("tenant_id", tenant_id.to_string())),
            ReadScope::Unrestricted => self
                .db
                .query("SELECT * FROM type::record('student', $id)")
                .bind(("id", id.to_string())),
        };

        let mut result = query.await.map_err(DbError::from)?;
        let rows: Vec<StudentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| Self::not_found(id))?;

        Ok(row.into_student(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateStudent) -> SkolarisResult<Student> {
        // Writes fail loudly without a tenant to constrain them to.
        let scope = match self.filter.read_scope() {
            ReadScope::DenyAll => return Err(DbError::MissingTenantContext.into()),
            scope => scope,
        };

        let mut sets = Vec::new();
        if input.first_name.is_some() {
            sets.push("first_name = $first_name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        sets.push("updated_at = time::now()");

        let where_clause = match scope {
            ReadScope::Tenant(_) => " WHERE tenant_id = $tenant_id",
            _ => "",
        };
        let query = format!(
            "UPDATE type::record('student', $id) SET {}{}",
            sets.join(", "),
            where_clause
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));
        if let ReadScope::Tenant(tenant_id) = scope {
            builder = builder.bind(("tenant_id", tenant_id.to_string()));
        }
        if let Some(first_name) = input.first_name {
            builder = builder.bind(("first_name", first_name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<StudentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| Self::not_found(id))?;

        Ok(row.into_student(id)?)
    }

    async fn delete(&self, id: Uuid) -> SkolarisResult<()> {
        match self.filter.read_scope() {
            ReadScope::DenyAll => Err(DbError::MissingTenantContext.into()),
            ReadScope::Tenant(tenant_id) => {
                self.db
                    .query(
                        "DELETE type::record('student', $id) \
                         WHERE tenant_id = $tenant_id",
                    )
                    .bind(("id", id.to_string()))
                    .bind(("tenant_id", tenant_id.to_string()))
                    .await
                    .map_err(DbError::from)?;
                Ok(())
            }
            ReadScope::Unrestricted => {
                self.db
                    .query("DELETE type::record('student', $id)")
                    .bind(("id", id.to_string()))
                    .await
                    .map_err(DbError::from)?;
                Ok(())
            }
        }
    }

    async fn list(&self, pagination: Pagination) -> SkolarisResult<PaginatedResult<Student>> {
        let scope = match self.filter.read_scope() {
            // Fail closed: zero rows, never all rows.
            ReadScope::DenyAll => return Ok(PaginatedResult::empty(&pagination)),
            scope => scope,
        };

        let (count_query, list_query) = match scope {
            ReadScope::Tenant(_) => (
                "SELECT count() AS total FROM student \
                 WHERE tenant_id = $tenant_id GROUP ALL",
                "SELECT meta::id(id) AS record_id, * \
                 FROM student \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            ),
            _ => (
                "SELECT count() AS total FROM student GROUP ALL",
                "SELECT meta::id(id) AS record_id, * \
                 FROM student \
                 ORDER BY created_at ASC \
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
        let rows: Vec<StudentRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_student())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
