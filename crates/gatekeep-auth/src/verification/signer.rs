//! Token signing boundary and its HMAC JWT implementation.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use gatekeep_core::env::{EnvStore, keys};
use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;

use super::claims::VerificationClaims;

/// Signs and verifies verification tokens.
pub trait TokenSigner: Send + Sync + std::fmt::Debug {
    fn sign(&self, claims: &VerificationClaims) -> AppResult<String>;

    /// Check signature and structure. Fails with `InvalidToken`.
    fn verify(&self, token: &str) -> AppResult<VerificationClaims>;
}

/// HMAC-signed JWTs keyed by the live `JWT_SECRET`.
///
/// The secret and algorithm (`JWT_TYPE`) are read from the env register on
/// every call. `exp` is not enforced here.
#[derive(Debug, Clone)]
pub struct JwtTokenSigner {
    env: Arc<EnvStore>,
}

impl JwtTokenSigner {
    pub fn new(env: Arc<EnvStore>) -> Self {
        Self { env }
    }

    fn algorithm(&self) -> AppResult<Algorithm> {
        match self.env.get_string(keys::JWT_TYPE).as_str() {
            "" | "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(AppError::configuration(format!(
                "Unsupported JWT_TYPE for verification tokens: '{other}'"
            ))),
        }
    }

    fn secret(&self) -> AppResult<String> {
        let secret = self.env.get_string(keys::JWT_SECRET);
        if secret.is_empty() {
            return Err(AppError::configuration("JWT_SECRET is not set"));
        }
        Ok(secret)
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &VerificationClaims) -> AppResult<String> {
        let key = EncodingKey::from_secret(self.secret()?.as_bytes());
        encode(&Header::new(self.algorithm()?), claims, &key)
            .map_err(|e| AppError::internal(format!("Failed to encode verification token: {e}")))
    }

    fn verify(&self, token: &str) -> AppResult<VerificationClaims> {
        let key = DecodingKey::from_secret(self.secret()?.as_bytes());

        let mut validation = Validation::new(self.algorithm()?);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<VerificationClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                _ => AppError::invalid_token(format!("Malformed verification token: {e}")),
            })
    }
}
