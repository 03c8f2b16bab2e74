//! Token verification service.
//!
//! Authentication itself is delegated to an external identity provider;
//! this service only verifies the HS256 bearer tokens that provider
//! issues and extracts the principal claims.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;

/// JWT claims payload, as issued by the identity provider
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token verification trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Verify a bearer token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService over a shared HS256 secret.
pub struct Authenticator {
    config: Config,
}

impl Authenticator {
    /// Create new token verifier
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl AuthService for Authenticator {
    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn issue_token(secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "employee@example.com".to_string(),
            role: "employee".to_string(),
            exp: now + 3600,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_the_shared_secret() {
        let verifier = Authenticator::new(Config::with_secret(SECRET));
        let claims = verifier.verify_token(&issue_token(SECRET)).unwrap();

        assert_eq!(claims.email, "employee@example.com");
        assert_eq!(claims.role, "employee");
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let verifier = Authenticator::new(Config::with_secret(SECRET));
        let token = issue_token("some-entirely-different-32char-key!!");

        assert!(verifier.verify_token(&token).is_err());
    }
}
