//! Skolaris Auth — consumption of already-verified identity.
//!
//! The identity provider owns login and token issuance; this crate
//! verifies token signatures/expiry and exposes the resulting
//! [`Principal`] to the rest of the pipeline. The tenant a principal
//! belongs to is deliberately *not* part of the principal — the
//! membership check resolves it from the user table.

pub mod config;
pub mod error;
pub mod principal;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use principal::{Principal, authenticate};
pub use token::AccessTokenClaims;
