//! Authentication configuration.

/// Configuration for token verification (and issuance, where the
/// deployment also runs provisioning tooling).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded Ed25519 public key for JWT verification.
    pub jwt_public_key_pem: String,
    /// PEM-encoded Ed25519 private key for JWT signing. Empty on
    /// verify-only deployments.
    pub jwt_private_key_pem: String,
    /// Expected JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Access token lifetime in seconds (default: 900 = 15 minutes).
    pub access_token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_public_key_pem: String::new(),
            jwt_private_key_pem: String::new(),
            jwt_issuer: "skolaris".into(),
            access_token_lifetime_secs: 900,
        }
    }
}
