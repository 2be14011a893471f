//! SurrealDB implementation of [`TenantRepository`].
//!
//! The tenant table is global scope — it *is* the directory the row
//! filter protects everything else with, so it is not itself filtered.
//! Resolution lookups are pure reads.

use chrono::{DateTime, Utc};
use skolaris_core::error::SkolarisResult;
use skolaris_core::models::tenant::{
    CreateTenant, SubscriptionStatus, SubscriptionTier, Tenant, UpdateTenant,
};
use skolaris_core::repository::{PaginatedResult, Pagination, TenantRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    subdomain: String,
    tier: String,
    status: String,
    realm: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    name: String,
    subdomain: String,
    tier: String,
    status: String,
    realm: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_tier(s: &str) -> Result<SubscriptionTier, DbError> {
    match s {
        "Free" => Ok(SubscriptionTier::Free),
        "Pro" => Ok(SubscriptionTier::Pro),
        "Enterprise" => Ok(SubscriptionTier::Enterprise),
        other => Err(DbError::Migration(format!("unknown tier: {other}"))),
    }
}

fn tier_to_string(tier: SubscriptionTier) -> &'static str {
    match tier {
        SubscriptionTier::Free => "Free",
        SubscriptionTier::Pro => "Pro",
        SubscriptionTier::Enterprise => "Enterprise",
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DbError> {
    match s {
        "Active" => Ok(SubscriptionStatus::Active),
        "PastDue" => Ok(SubscriptionStatus::PastDue),
        "Cancelled" => Ok(SubscriptionStatus::Cancelled),
        other => Err(DbError::Migration(format!("unknown status: {other}"))),
    }
}

fn status_to_string(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "Active",
        SubscriptionStatus::PastDue => "PastDue",
        SubscriptionStatus::Cancelled => "Cancelled",
    }
}

impl TenantRow {
    fn into_tenant(self, id: Uuid) -> Result<Tenant, DbError> {
        Ok(Tenant {
            id,
            name: self.name,
            subdomain: self.subdomain,
            tier: parse_tier(&self.tier)?,
            status: parse_status(&self.status)?,
            realm: self.realm,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Tenant {
            id,
            name: self.name,
            subdomain: self.subdomain,
            tier: parse_tier(&self.tier)?,
            status: parse_status(&self.status)?,
            realm: self.realm,
            is_active: self.is_active,
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

/// SurrealDB implementation of the Tenant repository.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, input: CreateTenant) -> SkolarisResult<Tenant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 name = $name, subdomain = $subdomain, \
                 tier = $tier, status = 'Active', \
                 realm = $realm, is_active = true",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("subdomain", input.subdomain))
            .bind(("tier", tier_to_string(input.tier).to_string()))
            .bind(("realm", input.realm))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SkolarisResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn find_active_by_subdomain(&self, subdomain: &str) -> SkolarisResult<Option<Tenant>> {
        let subdomain_owned = subdomain.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant \
                 WHERE subdomain = $subdomain AND is_active = true",
            )
            .bind(("subdomain", subdomain_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_tenant()?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, input: UpdateTenant) -> SkolarisResult<Tenant> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.tier.is_some() {
            sets.push("tier = $tier");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.is_active.is_some() {
            sets.push("is_active = $is_active");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('tenant', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(tier) = input.tier {
            builder = builder.bind(("tier", tier_to_string(tier).to_string()));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }
        if let Some(is_active) = input.is_active {
            builder = builder.bind(("is_active", is_active));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.into_tenant(id)?)
    }

    async fn deactivate(&self, id: Uuid) -> SkolarisResult<()> {
        self.db
            .query(
                "UPDATE type::record('tenant', $id) SET \
                 is_active = false, updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> SkolarisResult<PaginatedResult<Tenant>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM tenant GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_tenant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
