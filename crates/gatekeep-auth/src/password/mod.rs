//! Password hashing.

pub mod hasher;

pub use hasher::{Argon2PasswordHasher, PasswordHasher};
