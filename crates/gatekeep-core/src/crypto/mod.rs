//! Symmetric encryption and the base64 envelope codec.
//!
//! Everything secret that leaves the process (the persisted env snapshot,
//! key material carried through text columns or query strings) passes
//! through this module.

pub mod cipher;
pub mod encoding;

pub use cipher::{Cipher, KEY_LENGTH};
pub use encoding::{decode_b64, decode_b64_string, encode_b64};
