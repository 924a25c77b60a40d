//! In-process repositories.
//!
//! For tests and for embedding the trust core without PostgreSQL;
//! `TrustCore::bootstrap` always uses the PostgreSQL repositories. They
//! enforce the same constraints as the PostgreSQL schema.

pub mod env;
pub mod verification;

pub use env::MemoryEnvRepository;
pub use verification::MemoryVerificationRepository;
