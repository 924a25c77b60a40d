//! Workspace integration tests.
//!
//! Every test assembles a full `TrustCore` over the in-memory repositories
//! and session backend, so no database or Redis is needed.

mod bootstrap_test;
mod helpers;
mod session_test;
mod verification_test;
