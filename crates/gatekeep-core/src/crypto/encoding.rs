//! Base64 envelope for carrying key or state material through text fields.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Encodes bytes with the standard, padded base64 alphabet.
pub fn encode_b64(data: impl AsRef<[u8]>) -> String {
    STANDARD.encode(data)
}

/// Decodes standard base64. Malformed input is a decode error.
pub fn decode_b64(encoded: &str) -> AppResult<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// Decodes standard base64 that must carry UTF-8 text.
pub fn decode_b64_string(encoded: &str) -> AppResult<String> {
    let bytes = decode_b64(encoded)?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::with_source(ErrorKind::Decode, "Decoded value is not UTF-8", e))
}
