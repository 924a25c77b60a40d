//! Persisted env record.

pub mod model;

pub use model::{CreateEnvRecord, EnvRecord};
