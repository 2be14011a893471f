//! Skolaris Tenancy — the tenant-isolation pipeline.
//!
//! Defense in depth, in request order:
//!
//! 1. [`resolver`] — maps the Host header to a [`TenantContext`] (or
//!    rejects the request) before any handler runs.
//! 2. [`scope`] — flow-scoped storage making that context visible to
//!    the whole async call chain of one request, and only that request.
//! 3. [`membership`] — independently checks that the authenticated
//!    principal actually belongs to the resolved tenant.
//!
//! The third line of defense, the row filter, lives at the data layer
//! in `skolaris-db` and fails closed when no context is present.
//!
//! [`TenantContext`]: skolaris_core::TenantContext

pub mod directory;
pub mod error;
pub mod membership;
pub mod resolver;
pub mod scope;
pub mod subdomain;

pub use directory::{SubjectDirectory, TenantDirectory};
pub use error::TenancyError;
pub use membership::{DenyReason, MembershipDecision, MembershipState, require_membership};
pub use resolver::{ResolverState, resolve_tenant};
pub use subdomain::parse_subdomain;
