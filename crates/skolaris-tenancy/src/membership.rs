//! Tenant membership check — the second, independent line of defense.
//!
//! Even with a spoofed Host header or a routing bug, no cross-tenant
//! access happens unless the authenticated principal's own tenant
//! (resolved from the user table, not from token claims) matches the
//! resolved context. Pure policy: allow/deny plus audit logging,
//! no mutation, no tenant resolution.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use skolaris_auth::Principal;
use skolaris_core::error::SkolarisResult;
use tracing::warn;

use crate::directory::SubjectDirectory;
use crate::error::TenancyError;
use crate::scope;

/// Why a membership check denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Tenant-scoped request without an authenticated principal.
    NoPrincipal,
    /// The subject has no user record — a token that verified but
    /// maps to nobody we know.
    UnknownSubject,
    /// The principal belongs to a different tenant than the request
    /// resolved to.
    TenantMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipDecision {
    Allow,
    Deny(DenyReason),
}

/// Evaluate the membership policy for the current flow.
///
/// Reads the tenant context from the propagator; callers outside a
/// scoped flow (or on tenant-agnostic routes) are allowed — this layer
/// defers to route-level authorization in that case.
pub async fn evaluate(
    subjects: &dyn SubjectDirectory,
    principal: Option<&Principal>,
) -> SkolarisResult<MembershipDecision> {
    let Some(context) = scope::current() else {
        return Ok(MembershipDecision::Allow);
    };

    if context.is_self_hosted() {
        return Ok(MembershipDecision::Allow);
    }

    let Some(principal) = principal else {
        return Ok(MembershipDecision::Deny(DenyReason::NoPrincipal));
    };

    let Some(user_tenant_id) = subjects.find_tenant_for_subject(&principal.subject).await? else {
        warn!(
            subject = %principal.subject,
            context_tenant_id = %context.tenant_id,
            "membership denied: authenticated subject has no user record"
        );
        return Ok(MembershipDecision::Deny(DenyReason::UnknownSubject));
    };

    if user_tenant_id != context.tenant_id {
        warn!(
            subject = %principal.subject,
            user_tenant_id = %user_tenant_id,
            context_tenant_id = %context.tenant_id,
            "membership denied: principal tenant does not match resolved tenant"
        );
        return Ok(MembershipDecision::Deny(DenyReason::TenantMismatch));
    }

    Ok(MembershipDecision::Allow)
}

/// Shared state for [`require_membership`].
#[derive(Clone)]
pub struct MembershipState {
    pub subjects: Arc<dyn SubjectDirectory>,
}

/// Authorization middleware enforcing the membership policy on a
/// route group. Denials are opaque 403s — the reason goes to the
/// audit log only. Never retried, never downgraded to allow.
pub async fn require_membership(
    State(state): State<MembershipState>,
    request: Request,
    next: Next,
) -> Response {
    let principal = request.extensions().get::<Principal>().cloned();

    match evaluate(state.subjects.as_ref(), principal.as_ref()).await {
        Ok(MembershipDecision::Allow) => next.run(request).await,
        Ok(MembershipDecision::Deny(_)) => TenancyError::Forbidden.into_response(),
        Err(err) => TenancyError::Directory(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skolaris_core::context::TenantContext;
    use skolaris_core::models::tenant::SubscriptionTier;
    use skolaris_core::context::DeploymentMode;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// Fixed subject → tenant table standing in for the user store.
    struct StaticSubjects(HashMap<String, Uuid>);

    #[async_trait]
    impl SubjectDirectory for StaticSubjects {
        async fn find_tenant_for_subject(&self, subject: &str) -> SkolarisResult<Option<Uuid>> {
            Ok(self.0.get(subject).copied())
        }
    }

    fn saas_ctx(tenant_id: Uuid) -> TenantContext {
        TenantContext {
            tenant_id,
            mode: DeploymentMode::SaaS,
            tier: SubscriptionTier::Pro,
        }
    }

    fn principal(subject: &str) -> Principal {
        Principal {
            subject: subject.into(),
            realm: "acme".into(),
        }
    }

    #[tokio::test]
    async fn absent_context_allows() {
        let subjects = StaticSubjects(HashMap::new());
        let decision = evaluate(&subjects, None).await.unwrap();
        assert_eq!(decision, MembershipDecision::Allow);
    }

    #[tokio::test]
    async fn self_hosted_allows_unconditionally() {
        let subjects = StaticSubjects(HashMap::new());
        let decision = scope::with_context(
            Some(TenantContext::self_hosted()),
            evaluate(&subjects, None),
        )
        .await
        .unwrap();
        assert_eq!(decision, MembershipDecision::Allow);
    }

    #[tokio::test]
    async fn missing_principal_denies() {
        let subjects = StaticSubjects(HashMap::new());
        let decision = scope::with_context(Some(saas_ctx(Uuid::new_v4())), evaluate(&subjects, None))
            .await
            .unwrap();
        assert_eq!(decision, MembershipDecision::Deny(DenyReason::NoPrincipal));
    }

    #[tokio::test]
    async fn unknown_subject_denies() {
        let subjects = StaticSubjects(HashMap::new());
        let p = principal("idp|ghost");
        let decision = scope::with_context(
            Some(saas_ctx(Uuid::new_v4())),
            evaluate(&subjects, Some(&p)),
        )
        .await
        .unwrap();
        assert_eq!(decision, MembershipDecision::Deny(DenyReason::UnknownSubject));
    }

    #[tokio::test]
    async fn cross_tenant_principal_denies() {
        let tenant_a = Uuid::new_v4();
        let tenant_b = Uuid::new_v4();
        let subjects = StaticSubjects(HashMap::from([("idp|alice".to_string(), tenant_a)]));

        // Alice belongs to tenant A but the request resolved tenant B.
        let p = principal("idp|alice");
        let decision = scope::with_context(Some(saas_ctx(tenant_b)), evaluate(&subjects, Some(&p)))
            .await
            .unwrap();
        assert_eq!(decision, MembershipDecision::Deny(DenyReason::TenantMismatch));
    }

    #[tokio::test]
    async fn matching_tenant_allows() {
        let tenant_a = Uuid::new_v4();
        let subjects = StaticSubjects(HashMap::from([("idp|alice".to_string(), tenant_a)]));

        let p = principal("idp|alice");
        let decision = scope::with_context(Some(saas_ctx(tenant_a)), evaluate(&subjects, Some(&p)))
            .await
            .unwrap();
        assert_eq!(decision, MembershipDecision::Allow);
    }
}
