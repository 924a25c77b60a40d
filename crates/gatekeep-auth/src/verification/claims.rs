//! Claims carried inside a verification token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatekeep_entity::verification::VerificationIdentifier;

/// Payload of a verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    /// Lowercased recipient address.
    pub email: String,
    /// Purpose the token was issued for.
    pub identifier: VerificationIdentifier,
    /// Issued-at (epoch seconds).
    pub iat: i64,
    /// Expiry (epoch seconds). Informational; the stored request decides.
    pub exp: i64,
    /// Unique token id, so two tokens issued in the same second differ.
    pub jti: Uuid,
}
