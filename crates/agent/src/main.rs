//! `pingrelay-agent` -- one-shot push notification relay.
//!
//! Reads a batch of message summaries, formats it into a single push
//! notification and delivers it to the notification gateway for the
//! configured recipient.
//!
//! # Usage
//!
//! ```text
//! pingrelay-agent [BATCH.json]
//! ```
//!
//! The batch is read from stdin when no file is given.
//!
//! # Environment variables
//!
//! | Variable                 | Required     | Default                            | Description                     |
//! |--------------------------|--------------|------------------------------------|---------------------------------|
//! | `PINGBERRY_ENABLED`      | no           | `false`                            | Master switch for the relay     |
//! | `PINGBERRY_EMAIL`        | when enabled | --                                 | Recipient device address        |
//! | `PINGBERRY_URL`          | no           | `https://api.pingberry.xyz/notify` | Gateway notify endpoint         |
//! | `PINGBERRY_TIMEOUT_SECS` | no           | `30`                               | Transport timeout per request   |

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pingrelay_agent::input;
use pingrelay_events::{GatewayClient, NotificationRelay, RelayConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pingrelay_agent=info,pingrelay_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match RelayConfig::from_env() {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::info!("Notification relay disabled, nothing to send");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid relay configuration");
            std::process::exit(1);
        }
    };

    let batch_path = std::env::args_os().nth(1).map(PathBuf::from);
    let messages = input::read_messages(batch_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load message batch");
        std::process::exit(1);
    });

    let client = GatewayClient::new(&config.gateway).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build gateway client");
        std::process::exit(1);
    });

    tracing::info!(
        recipient = %config.recipient,
        gateway = %config.gateway.url,
        message_count = messages.len(),
        "Starting pingrelay-agent",
    );

    let cancel = CancellationToken::new();
    let (relay, relay_handle) = NotificationRelay::spawn(client, cancel.clone());

    let result = relay.send(config.recipient.clone(), messages).await;

    cancel.cancel();
    let _ = relay_handle.await;

    match result {
        Ok(response) => {
            tracing::info!(response = %response, "Notification accepted by gateway");
        }
        Err(e) => {
            tracing::error!(status = e.status_code(), error = %e, "Notification not delivered");
            std::process::exit(1);
        }
    }
}
