//! Single-use verification tokens.

pub mod claims;
pub mod manager;
pub mod signer;

pub use claims::VerificationClaims;
pub use manager::{VERIFICATION_EXPIRY_MINUTES, VerificationTokenManager};
pub use signer::{JwtTokenSigner, TokenSigner};
