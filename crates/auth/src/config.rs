//! Token authority configuration

use crate::error::AuthConfigError;

/// Signing configuration injected into the `TokenAuthority` at construction.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Build a config, rejecting an empty secret
    pub fn new(
        jwt_secret: impl Into<String>,
        issuer: Option<String>,
    ) -> Result<Self, AuthConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }

        Ok(Self { jwt_secret, issuer })
    }

    /// Load from `JWT_SECRET` (required) and `JWT_ISSUER` (optional)
    pub fn from_env() -> Result<Self, AuthConfigError> {
        dotenvy::dotenv().ok();

        let secret = std::env::var("JWT_SECRET").map_err(|_| AuthConfigError::MissingSecret)?;
        let issuer = std::env::var("JWT_ISSUER").ok().filter(|iss| !iss.is_empty());

        Self::new(secret, issuer)
    }
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}
