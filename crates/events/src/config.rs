//! Relay configuration loaded from environment variables.
//!
//! The host application persists two user settings for the relay: whether it
//! is enabled and the recipient address. Both arrive here as environment
//! variables, alongside the gateway endpoint and the transport timeout.

use std::time::Duration;

use pingrelay_core::recipient::normalize_recipient;
use pingrelay_core::CoreError;

/// Production notification gateway endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.pingberry.xyz/notify";

/// Transport timeout for a single gateway request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Where and how to reach the notification gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Full URL of the notify endpoint.
    pub url: String,
    /// Timeout applied to each request by the HTTP client.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Point at `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

// ---------------------------------------------------------------------------
// RelayConfig
// ---------------------------------------------------------------------------

/// Settings for an enabled relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Validated recipient address.
    pub recipient: String,
    pub gateway: GatewayConfig,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when the relay is disabled, signalling that no
    /// notifications should be sent.
    ///
    /// | Variable                 | Required     | Default                            |
    /// |--------------------------|--------------|------------------------------------|
    /// | `PINGBERRY_ENABLED`      | no           | `false`                            |
    /// | `PINGBERRY_EMAIL`        | when enabled | --                                 |
    /// | `PINGBERRY_URL`          | no           | `https://api.pingberry.xyz/notify` |
    /// | `PINGBERRY_TIMEOUT_SECS` | no           | `30`                               |
    pub fn from_env() -> Result<Option<Self>, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, CoreError> {
        let enabled = match lookup("PINGBERRY_ENABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                CoreError::Config(format!("PINGBERRY_ENABLED must be a boolean, got '{raw}'"))
            })?,
            None => false,
        };

        if !enabled {
            return Ok(None);
        }

        let raw_recipient = lookup("PINGBERRY_EMAIL").ok_or_else(|| {
            CoreError::Config("PINGBERRY_EMAIL is required when PINGBERRY_ENABLED is set".into())
        })?;
        let recipient = normalize_recipient(&raw_recipient)?;

        let url = lookup("PINGBERRY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

        let timeout_secs = match lookup("PINGBERRY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                CoreError::Config(format!("PINGBERRY_TIMEOUT_SECS must be a valid u64, got '{raw}'"))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Some(Self {
            recipient,
            gateway: GatewayConfig {
                url,
                request_timeout: Duration::from_secs(timeout_secs),
            },
        }))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
