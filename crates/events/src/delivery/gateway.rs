//! Push gateway delivery client.
//!
//! [`GatewayClient`] posts a JSON-encoded [`NotificationPayload`] to the
//! notification gateway and maps the HTTP outcome to a [`DeliveryError`].
//! Each call makes exactly one attempt; retrying is left to the caller.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use pingrelay_core::CoreError;

use crate::config::GatewayConfig;

/// Delivery method requested from the gateway.
pub const DELIVERY_METHOD: &str = "mqtt";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The batch could not be formatted (e.g. it was empty). No request was made.
    #[error(transparent)]
    Format(#[from] CoreError),

    /// The payload could not be encoded as JSON.
    #[error("Failed to encode notification payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Gateway returned HTTP {0}")]
    InvalidStatus(u16),

    /// The gateway returned a 2xx status with an empty body.
    #[error("Gateway returned no data")]
    NoData,

    /// The response body is not valid UTF-8.
    #[error("Gateway response is not valid UTF-8: {0}")]
    InvalidResponse(#[from] std::string::FromUtf8Error),

    /// The relay worker stopped before the request could be processed.
    #[error("Notification relay is shut down")]
    RelayClosed,
}

impl DeliveryError {
    /// HTTP status carried by this failure, or `-1` when there was no HTTP
    /// response to take one from.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidStatus(code) => i32::from(*code),
            _ => -1,
        }
    }

    /// Whether the failure is an empty batch rejected before delivery.
    pub fn is_empty_batch(&self) -> bool {
        matches!(self, Self::Format(CoreError::EmptyBatch))
    }
}

// ---------------------------------------------------------------------------
// NotificationPayload
// ---------------------------------------------------------------------------

/// JSON body accepted by the gateway's notify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub recipient_email: String,
    pub message_title: String,
    pub message_body: String,
    pub method: String,
    pub queue_if_offline: bool,
    pub collapse_duplicates: bool,
}

impl NotificationPayload {
    pub fn new(
        recipient: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        collapse_duplicates: bool,
    ) -> Self {
        Self {
            recipient_email: recipient.into(),
            message_title: title.into(),
            message_body: body.into(),
            method: DELIVERY_METHOD.to_string(),
            queue_if_offline: false,
            collapse_duplicates,
        }
    }
}

// ---------------------------------------------------------------------------
// GatewayClient
// ---------------------------------------------------------------------------

/// Sends notifications to the push gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    url: String,
}

impl GatewayClient {
    /// Build a client for the configured gateway endpoint.
    pub fn new(config: &GatewayConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Gateway endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one notification and return the gateway's response text.
    pub async fn send(
        &self,
        recipient: &str,
        title: &str,
        body: &str,
        collapse_duplicates: bool,
    ) -> Result<String, DeliveryError> {
        let payload = NotificationPayload::new(recipient, title, body, collapse_duplicates);

        tracing::info!(
            recipient,
            title,
            body_bytes = body.len(),
            collapse_duplicates,
            "Sending notification"
        );

        match self.try_send(&payload).await {
            Ok(response) => {
                tracing::info!(recipient, response = %response, "Notification delivered");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    recipient,
                    status = e.status_code(),
                    error = %e,
                    "Notification delivery failed"
                );
                Err(e)
            }
        }
    }

    /// Execute a single POST request and decode the response body.
    async fn try_send(&self, payload: &NotificationPayload) -> Result<String, DeliveryError> {
        let json = serde_json::to_vec(payload)?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(json)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::InvalidStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(DeliveryError::NoData);
        }

        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
