//! Skolaris Database — SurrealDB connection management, schema
//! migrations, the tenant row filter, and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The fail-closed tenant row filter ([`TenantFilter`])
//! - Repository implementations for the `skolaris-core` traits and
//!   the `skolaris-tenancy` directory seams

mod connection;
mod directory;
mod error;
mod filter;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use directory::{SurrealSubjectDirectory, SurrealTenantDirectory};
pub use error::DbError;
pub use filter::{ReadScope, TenantFilter};
pub use schema::run_migrations;
