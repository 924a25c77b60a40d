//! Core traits defined in `gatekeep-core` and implemented by other crates.

pub mod session;

pub use session::SessionProvider;
