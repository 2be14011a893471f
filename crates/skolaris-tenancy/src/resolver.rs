//! Tenant resolution middleware — the first stage of every request.
//!
//! Populates the flow-scoped tenant context before any other request
//! processing, or short-circuits the request. Lookups go through the
//! read-only [`TenantDirectory`]; resolution never mutates anything.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use skolaris_core::context::{DeploymentMode, TenantContext};
use skolaris_core::models::tenant::SubscriptionStatus;
use tracing::{debug, info};

use crate::directory::TenantDirectory;
use crate::error::TenancyError;
use crate::scope;
use crate::subdomain::parse_subdomain;

/// Shared state for [`resolve_tenant`], built once at startup.
#[derive(Clone)]
pub struct ResolverState {
    pub mode: DeploymentMode,
    /// Base domain tenants live under (e.g. `skolaris.io`). Unused in
    /// self-hosted mode.
    pub base_domain: String,
    pub directory: Arc<dyn TenantDirectory>,
}

/// Resolution middleware. Layer this outermost so every downstream
/// stage — authentication, membership, handlers, data access — runs
/// inside the scoped context.
pub async fn resolve_tenant(
    State(state): State<ResolverState>,
    request: Request,
    next: Next,
) -> Response {
    // Self-hosted installs run every request under the fixed default
    // tenant; no directory lookup.
    if state.mode == DeploymentMode::SelfHosted {
        return scope::with_context(Some(TenantContext::self_hosted()), next.run(request)).await;
    }

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let Some(subdomain) = parse_subdomain(host, &state.base_domain) else {
        // Tenant-agnostic request (bare domain, health checks, ...).
        // Routes reached this way must do their own authorization.
        debug!(host, "no tenant subdomain; continuing without context");
        return scope::with_context(None, next.run(request)).await;
    };

    let tenant = match state.directory.find_active_by_subdomain(&subdomain).await {
        Ok(Some(tenant)) => tenant,
        Ok(None) => {
            info!(subdomain, "request for unknown or inactive tenant");
            return TenancyError::OrganizationNotFound { subdomain }.into_response();
        }
        Err(err) => return TenancyError::Directory(err).into_response(),
    };

    if tenant.status == SubscriptionStatus::Cancelled {
        info!(subdomain, tenant_id = %tenant.id, "request for cancelled tenant");
        return TenancyError::SubscriptionCancelled { subdomain }.into_response();
    }

    let context = TenantContext::from_tenant(&tenant);
    debug!(tenant_id = %context.tenant_id, subdomain, "tenant resolved");
    scope::with_context(Some(context), next.run(request)).await
}
