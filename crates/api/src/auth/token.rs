//! HS256 access-token validation.

use jsonwebtoken::{decode, DecodingKey, Validation};
use nest_core::types::ActorId;
use serde::{Deserialize, Serialize};

/// Claims this service reads from a provider-issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the actor's id at the auth provider.
    pub sub: ActorId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Actor email, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Configuration for access-token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC-SHA256 secret the auth provider signs tokens with.
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "AUTH_JWT_SECRET must not be empty");
        Self { jwt_secret }
    }
}

/// Verify an HS256 access token and return its claims.
///
/// Expiry is enforced; audience is not (providers vary in what they put
/// there and we only care about the subject).
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_aud = false;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}
