//! # gatekeep-cache
//!
//! Session store for Gatekeep: refresh tokens per user and device
//! fingerprint, plus short-lived OAuth social-login state. Two backends:
//!
//! - **memory**: in-process maps using [dashmap](https://crates.io/crates/dashmap)
//!   and [moka](https://crates.io/crates/moka)
//! - **redis**: Redis hashes and expiring keys via the [redis](https://crates.io/crates/redis) crate
//!
//! Exactly one backend is active per process, chosen from `REDIS_URL` when
//! the store is built.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::SessionStore;
