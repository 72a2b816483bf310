//! Session token verification.

use super::types::{Claims, Principal};
use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

/// Token verification errors.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),
    #[error("Token has no subject")]
    MissingSubject,
}

/// Verifies an opaque session token and decodes the principal it names.
///
/// Implementations wrap whatever the identity authority offers; the server
/// never issues or refreshes tokens itself.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError>;
}

/// HS256 JWT verifier sharing a secret with the identity authority.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = leeway_secs;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a token into its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, VerifyError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

#[async_trait]
impl SessionVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let claims = self.decode(token)?;
        Principal::from_claims(claims).ok_or(VerifyError::MissingSubject)
    }
}

/// Encode claims into a token. Used by tooling and tests standing in for the
/// identity authority.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
