//! Mail relay - transactional email sending with provider fallback.
//!
//! Requests are validated, sent through Mandrill, and retried once through
//! Mailgun when Mandrill cannot deliver. Both providers' answers are
//! normalized into a single [`SendResult`].
//!
//! ## Architecture
//!
//! ```text
//! Web form / JSON API → Dispatcher → validate → Mandrill → Mailgun
//! ```

pub mod config;
pub mod dispatch;
pub mod provider;
pub mod request;
pub mod result;
pub mod validate;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{Dispatcher, UNAVAILABLE_MESSAGE};
pub use provider::{EmailProvider, Mailgun, Mandrill};
pub use request::SendRequest;
pub use result::{SendResult, SendStatus};
pub use validate::validate;
pub use web::AppState;
