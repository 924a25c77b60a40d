//! Encrypted env record entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The single durable copy of the runtime env register.
///
/// `data` is the encrypted JSON snapshot. `hash` holds the base64 encoding
/// of the raw encryption key; it is not a digest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnvRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Base64 of the encryption key.
    pub hash: String,
    /// `nonce || ciphertext || tag` of the snapshot JSON.
    pub data: Vec<u8>,
    /// Creation time (epoch seconds).
    pub created_at: i64,
    /// Last update time (epoch seconds).
    pub updated_at: i64,
}

/// Data required to create the env record.
#[derive(Debug, Clone)]
pub struct CreateEnvRecord {
    pub hash: String,
    pub data: Vec<u8>,
}
