//! Server configuration, loaded from environment variables.

use skolaris_auth::AuthConfig;
use skolaris_core::context::DeploymentMode;
use skolaris_db::DbConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    pub mode: DeploymentMode,
    /// Base domain tenant subdomains live under. Required in SaaS
    /// mode, ignored when self-hosted.
    pub base_domain: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

fn env_or(var: &'static str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Load configuration from `SKOLARIS_*` environment variables.
    ///
    /// SaaS mode without a base domain is a hard startup error: a
    /// server that cannot tell subdomains apart must not come up at
    /// all rather than serve every tenant's data under no context.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = match env_or("SKOLARIS_MODE", "self-hosted").as_str() {
            "saas" => DeploymentMode::SaaS,
            "self-hosted" => DeploymentMode::SelfHosted,
            other => {
                return Err(ConfigError::Invalid {
                    var: "SKOLARIS_MODE",
                    value: other.to_string(),
                });
            }
        };

        let base_domain = std::env::var("SKOLARIS_BASE_DOMAIN").unwrap_or_default();
        if mode == DeploymentMode::SaaS && base_domain.is_empty() {
            return Err(ConfigError::Missing("SKOLARIS_BASE_DOMAIN"));
        }

        let db = DbConfig {
            url: env_or("SKOLARIS_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("SKOLARIS_DB_NAMESPACE", "skolaris"),
            database: env_or("SKOLARIS_DB_DATABASE", "main"),
            username: env_or("SKOLARIS_DB_USERNAME", "root"),
            password: env_or("SKOLARIS_DB_PASSWORD", "root"),
        };

        let auth = AuthConfig {
            jwt_public_key_pem: std::env::var("SKOLARIS_JWT_PUBLIC_KEY")
                .map_err(|_| ConfigError::Missing("SKOLARIS_JWT_PUBLIC_KEY"))?,
            jwt_private_key_pem: std::env::var("SKOLARIS_JWT_PRIVATE_KEY").unwrap_or_default(),
            jwt_issuer: env_or("SKOLARIS_JWT_ISSUER", "skolaris"),
            ..AuthConfig::default()
        };

        Ok(Self {
            bind_addr: env_or("SKOLARIS_BIND_ADDR", "0.0.0.0:8080"),
            mode,
            base_domain,
            db,
            auth,
        })
    }
}
