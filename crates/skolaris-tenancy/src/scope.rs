//! Flow-scoped tenant context propagation.
//!
//! One logical flow per request: the resolution middleware scopes the
//! context around the rest of the request's future, and everything
//! that future awaits — however deep — sees it via [`current`].
//! Storage is a tokio task-local, never a process-global, so two
//! requests multiplexed onto the same worker threads cannot observe
//! each other's value.

use skolaris_core::context::TenantContext;
use skolaris_core::error::{SkolarisError, SkolarisResult};

tokio::task_local! {
    static TENANT_CONTEXT: Option<TenantContext>;
}

/// Run `fut` with `context` as the current tenant context for its
/// entire async call tree. `None` explicitly clears the context for
/// the inner flow (used by tenant-agnostic code paths).
pub async fn with_context<F>(context: Option<TenantContext>, fut: F) -> F::Output
where
    F: Future,
{
    TENANT_CONTEXT.scope(context, fut).await
}

/// The tenant context of the calling flow, or `None` when the flow was
/// never scoped (or was scoped to `None`).
pub fn current() -> Option<TenantContext> {
    TENANT_CONTEXT.try_with(|ctx| ctx.clone()).unwrap_or(None)
}

/// Like [`current`], but absence is an error — for code paths that
/// must be tenant-scoped (e.g. stamping a new record).
pub fn require() -> SkolarisResult<TenantContext> {
    current().ok_or(SkolarisError::TenantContext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skolaris_core::context::DeploymentMode;
    use skolaris_core::models::tenant::SubscriptionTier;
    use std::sync::Arc;
    use tokio::sync::Barrier;
    use uuid::Uuid;

    fn ctx(id: Uuid) -> TenantContext {
        TenantContext {
            tenant_id: id,
            mode: DeploymentMode::SaaS,
            tier: SubscriptionTier::Pro,
        }
    }

    #[tokio::test]
    async fn unscoped_flow_has_no_context() {
        assert_eq!(current(), None);
        assert!(matches!(require(), Err(SkolarisError::TenantContext)));
    }

    #[tokio::test]
    async fn scoped_value_is_visible_down_the_call_chain() {
        let id = Uuid::new_v4();
        with_context(Some(ctx(id)), async move {
            async fn deep() -> Option<TenantContext> {
                tokio::task::yield_now().await;
                current()
            }
            assert_eq!(deep().await.unwrap().tenant_id, id);
        })
        .await;
        assert_eq!(current(), None);
    }

    #[tokio::test]
    async fn nested_none_clears_for_inner_flow_only() {
        let id = Uuid::new_v4();
        with_context(Some(ctx(id)), async move {
            with_context(None, async {
                assert_eq!(current(), None);
            })
            .await;
            assert_eq!(current().unwrap().tenant_id, id);
        })
        .await;
    }

    /// Two concurrent flows with different contexts must never observe
    /// each other's value at any suspension point, even when scheduled
    /// on the same workers.
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_flows_do_not_leak() {
        let barrier = Arc::new(Barrier::new(2));
        let id_a = Uuid::new_v4();
        let id_b = Uuid::new_v4();

        let spawn_flow = |id: Uuid, barrier: Arc<Barrier>| {
            tokio::spawn(with_context(Some(ctx(id)), async move {
                for _ in 0..10 {
                    assert_eq!(current().unwrap().tenant_id, id);
                    // Suspension point: the other flow runs here.
                    barrier.wait().await;
                    assert_eq!(current().unwrap().tenant_id, id);
                    tokio::task::yield_now().await;
                }
            }))
        };

        let a = spawn_flow(id_a, barrier.clone());
        let b = spawn_flow(id_b, barrier);
        a.await.unwrap();
        b.await.unwrap();
    }
}
