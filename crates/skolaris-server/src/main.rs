use std::sync::Arc;

use skolaris_db::{DbManager, run_migrations};
use skolaris_server::{ServerConfig, build_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let manager = match DbManager::connect(&config.db).await {
        Ok(manager) => manager,
        Err(err) => {
            error!(error = %err, "database connection failed");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_migrations(manager.client()).await {
        error!(error = %err, "migrations failed");
        std::process::exit(1);
    }

    let app = build_router(
        manager.client().clone(),
        config.mode,
        config.base_domain.clone(),
        Arc::new(config.auth.clone()),
    );

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %config.bind_addr, error = %err, "bind failed");
            std::process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, mode = ?config.mode, "Skolaris server listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "server error");
        std::process::exit(1);
    }
}
