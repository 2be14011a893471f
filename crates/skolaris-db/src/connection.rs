//! SurrealDB connection management.
//!
//! One entry point per engine: the server binary connects over
//! WebSocket, the integration suites run against an ephemeral
//! in-memory instance. Both hand out the same [`DbManager`] so the
//! rest of the crate never cares which engine it is on.

use surrealdb::engine::local::{Db, Mem};
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

/// Settings for a remote SurrealDB instance.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address, e.g. `127.0.0.1:8000`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

/// A ready-to-use SurrealDB handle, generic over the engine.
#[derive(Clone)]
pub struct DbManager<C: Connection> {
    db: Surreal<C>,
}

impl DbManager<Client> {
    /// Connect over WebSocket, authenticate as root, and select the
    /// configured namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("SurrealDB connection ready");

        Ok(Self { db })
    }
}

impl DbManager<Db> {
    /// Ephemeral in-memory instance. Nothing survives the handle;
    /// callers still run migrations themselves.
    pub async fn memory() -> Result<Self, surrealdb::Error> {
        let db = Surreal::new::<Mem>(()).await?;
        db.use_ns("skolaris").use_db("main").await?;
        Ok(Self { db })
    }
}

impl<C: Connection> DbManager<C> {
    pub fn client(&self) -> &Surreal<C> {
        &self.db
    }
}
