//! Verification email delivery.

pub mod dispatcher;
pub mod sender;

pub use dispatcher::EmailDispatcher;
pub use sender::{EmailSender, TracingEmailSender};
