//! Skolaris Server — the tenant-isolated HTTP API.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;

pub use app::{AppState, build_router};
pub use config::{ConfigError, ServerConfig};
