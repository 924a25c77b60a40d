//! Verification request entities.

pub mod identifier;
pub mod model;

pub use identifier::{VerificationIdentifier, is_valid_identifier};
pub use model::{CreateVerificationRequest, VerificationRequest};
