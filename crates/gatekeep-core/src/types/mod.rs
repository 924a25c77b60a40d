//! Shared value types.

pub mod app_state;
pub mod origin;

pub use app_state::{AppState, decode_app_state, encode_app_state};
pub use origin::is_valid_origin;
