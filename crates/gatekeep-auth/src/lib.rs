//! # gatekeep-auth
//!
//! Credential handling for the Gatekeep trust core.
//!
//! ## Modules
//!
//! - `verification`: single-use expiring tokens tied to an email and a purpose
//! - `password`: Argon2id password hashing
//! - `email`: fire-and-forget dispatch of verification emails

pub mod email;
pub mod password;
pub mod verification;

pub use email::{EmailDispatcher, EmailSender, TracingEmailSender};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use verification::{
    JwtTokenSigner, TokenSigner, VERIFICATION_EXPIRY_MINUTES, VerificationClaims,
    VerificationTokenManager,
};
