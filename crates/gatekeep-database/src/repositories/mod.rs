//! Repository traits and their PostgreSQL implementations.

pub mod env;
pub mod error;
pub mod verification;

pub use env::{EnvRepository, PgEnvRepository};
pub use error::is_unique_violation;
pub use verification::{PgVerificationRepository, VerificationRepository};
