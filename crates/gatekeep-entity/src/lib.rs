//! # gatekeep-entity
//!
//! Domain entity models for Gatekeep. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`. Timestamps are epoch seconds.

pub mod env;
pub mod verification;
