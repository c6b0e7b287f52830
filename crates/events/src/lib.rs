//! Notification relay infrastructure.
//!
//! This crate turns batches of message summaries into push notifications and
//! delivers them to the notification gateway:
//!
//! - [`GatewayClient`]: single-attempt HTTP delivery to the gateway.
//! - [`NotificationRelay`]: serial worker that formats batches and
//!   dispatches their delivery, handing results back via [`RelayHandle`].
//! - [`RelayConfig`]: environment-driven settings.

pub mod config;
pub mod delivery;
pub mod relay;

pub use config::{GatewayConfig, RelayConfig};
pub use delivery::gateway::{DeliveryError, GatewayClient, NotificationPayload};
pub use relay::{DeliveryResult, NotificationRelay, RelayHandle};
