//! # gatekeep-database
//!
//! PostgreSQL connection management, repository traits with PostgreSQL and
//! in-memory implementations, and the bootstrap protocol that keeps the
//! runtime env register in sync with its encrypted database record.

pub mod connection;
pub mod env_sync;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use env_sync::EnvSync;
pub use memory::{MemoryEnvRepository, MemoryVerificationRepository};
pub use repositories::{
    EnvRepository, PgEnvRepository, PgVerificationRepository, VerificationRepository,
};
