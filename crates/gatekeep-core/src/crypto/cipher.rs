//! AES-256-GCM authenticated encryption keyed by the env encryption key.
//!
//! Ciphertext layout: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::AppError;
use crate::result::AppResult;

/// Required key length in bytes (256-bit key).
pub const KEY_LENGTH: usize = 32;

/// Nonce length in bytes for AES-GCM.
const NONCE_LENGTH: usize = 12;

/// Encrypts and decrypts opaque payloads with a single symmetric key.
#[derive(Clone)]
pub struct Cipher {
    inner: Aes256Gcm,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

impl Cipher {
    /// Builds a cipher from raw key material.
    ///
    /// Fails with a crypto error unless the key is exactly [`KEY_LENGTH`] bytes.
    pub fn new(key: &[u8]) -> AppResult<Self> {
        if key.len() != KEY_LENGTH {
            return Err(AppError::crypto(format!(
                "Encryption key must be {KEY_LENGTH} bytes, got {}",
                key.len()
            )));
        }

        let inner = Aes256Gcm::new_from_slice(key)
            .map_err(|e| AppError::crypto(format!("Invalid encryption key: {e}")))?;

        Ok(Self { inner })
    }

    /// Builds a cipher from a textual key such as the env `ENCRYPTION_KEY`.
    pub fn from_key_str(key: &str) -> AppResult<Self> {
        Self::new(key.as_bytes())
    }

    /// Encrypts `plaintext` under a fresh random nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> AppResult<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .inner
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::crypto(format!("Encryption failure: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypts data produced by [`Cipher::encrypt`].
    ///
    /// Any modification of the nonce, ciphertext, or tag is rejected.
    pub fn decrypt(&self, data: &[u8]) -> AppResult<Vec<u8>> {
        if data.len() < NONCE_LENGTH {
            return Err(AppError::crypto("Invalid ciphertext length"));
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LENGTH);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.inner
            .decrypt(nonce, ciphertext)
            .map_err(|_| AppError::crypto("Decryption failure: ciphertext rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = Cipher::from_key_str(KEY).unwrap();
        let plaintext = br#"{"string_env":{"PORT":"8080"}}"#;

        let encrypted = cipher.encrypt(plaintext).unwrap();
        assert_ne!(&encrypted[NONCE_LENGTH..], plaintext.as_slice());

        let decrypted = cipher.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_nonce_differs_per_call() {
        let cipher = Cipher::from_key_str(KEY).unwrap();
        let a = cipher.encrypt(b"same").unwrap();
        let b = cipher.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_single_bit_flip_is_rejected() {
        let cipher = Cipher::from_key_str(KEY).unwrap();
        let encrypted = cipher.encrypt(b"snapshot payload").unwrap();

        for index in [0, NONCE_LENGTH, encrypted.len() - 1] {
            let mut tampered = encrypted.clone();
            tampered[index] ^= 0x01;
            let err = cipher.decrypt(&tampered).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Crypto);
        }
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let cipher = Cipher::from_key_str(KEY).unwrap();
        let other = Cipher::from_key_str("fedcba9876543210fedcba9876543210").unwrap();
        let encrypted = cipher.encrypt(b"secret").unwrap();
        assert_eq!(other.decrypt(&encrypted).unwrap_err().kind, ErrorKind::Crypto);
    }

    #[test]
    fn test_key_size_mismatch() {
        let err = Cipher::from_key_str("too-short").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Crypto);

        let uuid_key = "4f0c1b9e-2d7a-4c55-9a61-0b3e8f7d2a14";
        assert!(Cipher::from_key_str(uuid_key).is_err());
        assert!(Cipher::from_key_str(&uuid_key[..KEY_LENGTH]).is_ok());
    }

    #[test]
    fn test_truncated_ciphertext() {
        let cipher = Cipher::from_key_str(KEY).unwrap();
        assert_eq!(cipher.decrypt(&[1, 2, 3]).unwrap_err().kind, ErrorKind::Crypto);
    }
}
