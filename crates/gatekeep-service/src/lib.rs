//! # gatekeep-service
//!
//! Wiring layer for Gatekeep. [`TrustCore`] owns the env register, the
//! session store, and the verification token manager, and is built once at
//! process start.
//!
//! Dependencies are constructed here and handed to components as `Arc`
//! references.

pub mod cleanup;
pub mod context;

pub use cleanup::VerificationCleanup;
pub use context::{TrustCore, TrustCoreParts};
