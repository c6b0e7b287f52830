//! Domain logic for the push-notification relay.
//!
//! Everything in this crate is pure and synchronous: message summaries,
//! display-text derivation, byte-budget truncation, batch formatting and
//! recipient validation. Network delivery lives in `pingrelay-events`.

pub mod batching;
pub mod error;
pub mod message;
pub mod recipient;
pub mod truncation;

pub use batching::{format_batch, FormattedNotification};
pub use error::CoreError;
pub use message::MessageSummary;
