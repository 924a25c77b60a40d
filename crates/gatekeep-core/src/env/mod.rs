//! Runtime env register.
//!
//! The register holds every runtime setting the service consults while
//! serving requests (feature flags, SMTP settings, allowed origins, the
//! signing secret, the encryption key). It is seeded from defaults and the
//! process environment, reconciled with the encrypted record persisted in
//! the database, and mutated per key for the lifetime of the process.

pub mod keys;
pub mod reconcile;
pub mod snapshot;
pub mod source;
pub mod store;

pub use reconcile::{reconcile, smtp_unconfigured};
pub use snapshot::EnvSnapshot;
pub use source::{EnvSource, MapEnv, ProcessEnv};
pub use store::EnvStore;
