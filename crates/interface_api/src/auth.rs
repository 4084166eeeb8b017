//! Authentication and authorization
//!
//! Bearer JWTs carry the authenticated user and role; the middleware turns
//! them into a `core_kernel::Actor` that is threaded explicitly into every
//! claim store and HITL gate call.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{Actor, ActorRole};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Actor role
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl TokenClaims {
    /// The actor this token authenticates
    pub fn actor(&self) -> Actor {
        let role = ActorRole::parse(&self.role).unwrap_or(ActorRole::User);
        Actor::new(self.sub.clone(), role)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
pub fn create_token(
    username: &str,
    role: ActorRole,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: username.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("mwilson", ActorRole::Reviewer, SECRET, 3600).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "mwilson");
        let actor = claims.actor();
        assert_eq!(actor.name, "mwilson");
        assert_eq!(actor.role, ActorRole::Reviewer);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("mwilson", ActorRole::User, SECRET, 3600).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_unknown_role_defaults_to_user() {
        let claims = TokenClaims {
            sub: "ghost".to_string(),
            role: "Wizard".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.actor().role, ActorRole::User);
    }
}
