//! # gatekeep-core
//!
//! Core crate for Gatekeep. Contains the process bootstrap configuration,
//! the runtime env register ([`env::EnvStore`]), the symmetric crypto
//! boundary, the session provider trait, shared value types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Gatekeep crates.

pub mod config;
pub mod crypto;
pub mod env;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
