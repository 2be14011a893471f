//! User domain model.
//!
//! Users authenticate against the external identity provider; Skolaris
//! stores the authoritative mapping from the provider's stable subject
//! identifier to the tenant the user belongs to. The membership check
//! trusts this table, never a token claim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// The tenant this user belongs to. Immutable after creation.
    pub tenant_id: Uuid,
    /// Identity-provider subject identifier (`sub` claim), unique.
    pub subject: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub tenant_id: Uuid,
    pub subject: String,
    pub email: String,
    pub display_name: String,
}
