pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub use password::{PasswordError, PasswordHasher};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub username: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Issues and verifies HS256 session tokens. Built once at startup from the
/// security config and shared read-only across requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, lifetime: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            lifetime,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(
            &security.jwt_secret,
            security.jwt_issuer.clone(),
            Duration::hours(security.jwt_expiry_hours),
        )
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue(&self, username: &str) -> Result<String, JwtError> {
        self.issue_at(username, Utc::now())
    }

    /// Issues a token as if it had been minted at `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims {
            username: username.to_string(),
            iss: self.issuer.clone(),
            exp: (issued_at + self.lifetime).timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Checks signature, issuer and expiry and returns the asserted username.
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        // jsonwebtoken only rejects exp < now; the token is dead from the exp second on
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(JwtError::Expired);
        }

        if token_data.claims.username.is_empty() {
            return Err(JwtError::InvalidToken("missing username".to_string()));
        }

        Ok(token_data.claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", "go-marketplace", Duration::hours(24)).unwrap()
    }

    #[test]
    fn issued_token_verifies_to_same_username() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn token_valid_until_lifetime_elapses() {
        let tokens = service();

        let almost = tokens
            .issue_at("alice", Utc::now() - Duration::hours(23) - Duration::minutes(59))
            .unwrap();
        assert_eq!(tokens.verify(&almost).unwrap(), "alice");

        let stale = tokens
            .issue_at("alice", Utc::now() - Duration::hours(24) - Duration::seconds(5))
            .unwrap();
        assert!(matches!(tokens.verify(&stale), Err(JwtError::Expired)));
    }

    #[test]
    fn token_is_dead_at_its_exp_second() {
        let tokens = service();
        let at_exp = tokens.issue_at("alice", Utc::now() - Duration::hours(24)).unwrap();
        assert!(matches!(tokens.verify(&at_exp), Err(JwtError::Expired)));
    }

    #[test]
    fn rejects_foreign_signature() {
        let other = TokenService::new("other-secret", "go-marketplace", Duration::hours(24)).unwrap();
        let token = other.issue("alice").unwrap();
        assert!(matches!(service().verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_foreign_issuer() {
        let other = TokenService::new("test-secret", "someone-else", Duration::hours(24)).unwrap();
        let token = other.issue("alice").unwrap();
        assert!(matches!(service().verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(service().verify("not.a.jwt"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            TokenService::new("", "go-marketplace", Duration::hours(24)),
            Err(JwtError::InvalidSecret)
        ));
    }
}
