//! In-process session backend.

pub mod store;

pub use store::MemorySessionProvider;
