//! Tenant domain model.
//!
//! A tenant is a registered school/organization. Every tenant-scoped
//! record carries its tenant's id, and all access to such records is
//! constrained to the tenant resolved for the current request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription plan, ordered: `Free < Pro < Enterprise`.
///
/// The ordering is load-bearing — capability checks compare tiers
/// (see [`crate::context::TenantContext::has_payment_features`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum SubscriptionTier {
    Free,
    Pro,
    Enterprise,
}

/// Billing standing of a tenant's subscription.
///
/// Only `Cancelled` blocks request resolution; `PastDue` tenants keep
/// working while dunning runs its course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Cancelled,
}

/// A registered organization.
///
/// Owned by tenant provisioning; this subsystem only reads tenants and
/// never deletes them (deactivation flips `is_active`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Human-readable organization name.
    pub name: String,
    /// Unique, lowercase DNS label the tenant is reached under
    /// (e.g. `acme` for `acme.skolaris.io`).
    pub subdomain: String,
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    /// Identity-provider realm this tenant's users authenticate against.
    pub realm: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub subdomain: String,
    pub tier: SubscriptionTier,
    pub realm: String,
}

/// Fields that can be updated on an existing tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateTenant {
    pub name: Option<String>,
    pub tier: Option<SubscriptionTier>,
    pub status: Option<SubscriptionStatus>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(SubscriptionTier::Free < SubscriptionTier::Pro);
        assert!(SubscriptionTier::Pro < SubscriptionTier::Enterprise);
    }
}
