//! The per-request tenant context.
//!
//! Created once by the tenant resolution stage, read-only afterwards,
//! discarded when the request ends. Code deeper in the call chain
//! reaches it through the flow-scoped propagator in `skolaris-tenancy`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::tenant::{SubscriptionTier, Tenant};

/// How this installation is deployed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Many tenants behind subdomains; row filtering enforced.
    SaaS,
    /// Single implicit tenant; isolation is moot.
    SelfHosted,
}

/// Well-known tenant id used by self-hosted installations.
///
/// Reserved — the SaaS provisioning path must never hand out this id.
pub const DEFAULT_TENANT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);

/// The resolved tenant identity for one in-flight request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub mode: DeploymentMode,
    pub tier: SubscriptionTier,
}

impl TenantContext {
    /// Build a context from a resolved tenant record (SaaS mode).
    pub fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            tenant_id: tenant.id,
            mode: DeploymentMode::SaaS,
            tier: tenant.tier,
        }
    }

    /// The fixed context every self-hosted request runs under.
    pub fn self_hosted() -> Self {
        Self {
            tenant_id: DEFAULT_TENANT_ID,
            mode: DeploymentMode::SelfHosted,
            tier: SubscriptionTier::Enterprise,
        }
    }

    pub fn is_self_hosted(&self) -> bool {
        self.mode == DeploymentMode::SelfHosted
    }

    /// Whether payment features are available: self-hosted installs get
    /// everything, SaaS tenants need at least the Pro tier.
    pub fn has_payment_features(&self) -> bool {
        self.is_self_hosted() || self.tier >= SubscriptionTier::Pro
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tenant::SubscriptionStatus;
    use chrono::Utc;

    fn tenant(tier: SubscriptionTier) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            name: "Acme Academy".into(),
            subdomain: "acme".into(),
            tier,
            status: SubscriptionStatus::Active,
            realm: "acme".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn saas_context_carries_tenant_fields() {
        let t = tenant(SubscriptionTier::Pro);
        let ctx = TenantContext::from_tenant(&t);
        assert_eq!(ctx.tenant_id, t.id);
        assert_eq!(ctx.mode, DeploymentMode::SaaS);
        assert_eq!(ctx.tier, SubscriptionTier::Pro);
    }

    #[test]
    fn self_hosted_context_is_fixed() {
        let ctx = TenantContext::self_hosted();
        assert_eq!(ctx.tenant_id, DEFAULT_TENANT_ID);
        assert_eq!(ctx.tier, SubscriptionTier::Enterprise);
        assert!(ctx.is_self_hosted());
    }

    #[test]
    fn payment_features_derive_from_mode_and_tier() {
        assert!(TenantContext::self_hosted().has_payment_features());
        assert!(!TenantContext::from_tenant(&tenant(SubscriptionTier::Free)).has_payment_features());
        assert!(TenantContext::from_tenant(&tenant(SubscriptionTier::Pro)).has_payment_features());
        assert!(
            TenantContext::from_tenant(&tenant(SubscriptionTier::Enterprise))
                .has_payment_features()
        );
    }
}
