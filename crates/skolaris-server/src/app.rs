//! Router assembly — where the isolation pipeline is wired together.
//!
//! Layer order, outermost first: tenant resolution, authentication,
//! then (on tenant-scoped routes only) the membership check. Handlers
//! run innermost, inside the flow-scoped tenant context.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use skolaris_auth::{AuthConfig, authenticate};
use skolaris_core::context::DeploymentMode;
use skolaris_db::repository::{SurrealCourseRepository, SurrealStudentRepository};
use skolaris_db::{SurrealSubjectDirectory, SurrealTenantDirectory, TenantFilter};
use skolaris_tenancy::{MembershipState, ResolverState, require_membership, resolve_tenant};
use surrealdb::{Connection, Surreal};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared handler state: the tenant-scoped repositories.
pub struct AppState<C: Connection> {
    pub students: SurrealStudentRepository<C>,
    pub courses: SurrealCourseRepository<C>,
}

// Manual impl: the repositories are `Clone` for any engine, so no
// `C: Clone` bound is needed (a derive would add one).
impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            students: self.students.clone(),
            courses: self.courses.clone(),
        }
    }
}

/// Build the full application router over any SurrealDB engine.
pub fn build_router<C: Connection>(
    db: Surreal<C>,
    mode: DeploymentMode,
    base_domain: String,
    auth: Arc<AuthConfig>,
) -> Router {
    let filter = TenantFilter::for_mode(mode);

    let state = AppState {
        students: SurrealStudentRepository::new(db.clone(), filter),
        courses: SurrealCourseRepository::new(db.clone(), filter),
    };

    let resolver = ResolverState {
        mode,
        base_domain,
        directory: Arc::new(SurrealTenantDirectory::new(db.clone())),
    };

    let membership = MembershipState {
        subjects: Arc::new(SurrealSubjectDirectory::new(db)),
    };

    let tenant_routes = Router::new()
        .route(
            "/api/students",
            get(handlers::list_students::<C>).post(handlers::create_student::<C>),
        )
        .route(
            "/api/students/:id",
            get(handlers::get_student::<C>)
                .put(handlers::update_student::<C>)
                .delete(handlers::delete_student::<C>),
        )
        .route(
            "/api/courses",
            get(handlers::list_courses::<C>).post(handlers::create_course::<C>),
        )
        .route("/api/courses/:code", get(handlers::get_course::<C>))
        .route_layer(from_fn_with_state(membership, require_membership))
        .with_state(state);

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/organization", get(handlers::organization))
        .merge(tenant_routes)
        .layer(from_fn_with_state(auth, authenticate))
        .layer(from_fn_with_state(resolver, resolve_tenant))
        .layer(TraceLayer::new_for_http())
}
