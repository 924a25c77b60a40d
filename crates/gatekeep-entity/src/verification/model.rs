//! Verification request entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A live single-use verification token.
///
/// At most one request exists per `(email, identifier)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VerificationRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The signed token handed to the user.
    pub token: String,
    /// Purpose, one of the `VerificationIdentifier` string forms.
    pub identifier: String,
    /// Lowercased email the token was issued to.
    pub email: String,
    /// Expiry time (epoch seconds).
    pub expires_at: i64,
    /// Creation time (epoch seconds).
    pub created_at: i64,
    /// Last update time (epoch seconds).
    pub updated_at: i64,
}

impl VerificationRequest {
    /// Check whether the request has expired at `now` (epoch seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }
}

/// Data required to create a verification request.
#[derive(Debug, Clone)]
pub struct CreateVerificationRequest {
    pub token: String,
    pub identifier: String,
    pub email: String,
    pub expires_at: i64,
}
