//! Serial notification relay.
//!
//! [`NotificationRelay`] owns a single worker task that drains a queue of send
//! requests one at a time: each batch is formatted on the worker, then its HTTP
//! delivery is spawned as a separate task so the worker never waits on the
//! network. Callers talk to the worker through a cloneable [`RelayHandle`].
//!
//! Every submitted request receives exactly one result, delivered once through
//! a `oneshot` channel; the awaiting caller resumes on its own task.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use pingrelay_core::{format_batch, CoreError, MessageSummary};

use crate::delivery::gateway::{DeliveryError, GatewayClient};

/// Outcome of a single relay request.
pub type DeliveryResult = Result<String, DeliveryError>;

struct SendRequest {
    recipient: String,
    messages: Vec<MessageSummary>,
    reply: oneshot::Sender<DeliveryResult>,
}

// ---------------------------------------------------------------------------
// RelayHandle
// ---------------------------------------------------------------------------

/// Submits notification batches to a running [`NotificationRelay`].
#[derive(Clone)]
pub struct RelayHandle {
    sender: mpsc::UnboundedSender<SendRequest>,
}

impl RelayHandle {
    /// Queue a batch for delivery and return a receiver for its result.
    ///
    /// An empty batch is answered immediately with
    /// [`CoreError::EmptyBatch`] and never reaches the gateway. If the relay
    /// has shut down the receiver yields [`DeliveryError::RelayClosed`].
    pub fn submit(
        &self,
        recipient: impl Into<String>,
        messages: Vec<MessageSummary>,
    ) -> oneshot::Receiver<DeliveryResult> {
        let (reply, receiver) = oneshot::channel();

        if messages.is_empty() {
            let _ = reply.send(Err(CoreError::EmptyBatch.into()));
            return receiver;
        }

        let request = SendRequest {
            recipient: recipient.into(),
            messages,
            reply,
        };

        if let Err(mpsc::error::SendError(request)) = self.sender.send(request) {
            let _ = request.reply.send(Err(DeliveryError::RelayClosed));
        }

        receiver
    }

    /// Queue a batch and wait for the gateway's response.
    pub async fn send(
        &self,
        recipient: impl Into<String>,
        messages: Vec<MessageSummary>,
    ) -> DeliveryResult {
        self.submit(recipient, messages)
            .await
            .unwrap_or(Err(DeliveryError::RelayClosed))
    }
}

// ---------------------------------------------------------------------------
// NotificationRelay
// ---------------------------------------------------------------------------

/// Background worker that formats and dispatches notification batches.
pub struct NotificationRelay {
    client: Arc<GatewayClient>,
    receiver: mpsc::UnboundedReceiver<SendRequest>,
    /// Time of the last dispatch per recipient. Recorded only; nothing
    /// throttles on it yet.
    last_sent: HashMap<String, DateTime<Utc>>,
}

impl NotificationRelay {
    /// Start the relay worker.
    ///
    /// The worker runs until `cancel` is cancelled or every [`RelayHandle`]
    /// has been dropped. Deliveries already dispatched still complete;
    /// requests left in the queue are answered with
    /// [`DeliveryError::RelayClosed`].
    pub fn spawn(client: GatewayClient, cancel: CancellationToken) -> (RelayHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let relay = Self {
            client: Arc::new(client),
            receiver,
            last_sent: HashMap::new(),
        };

        let handle = tokio::spawn(relay.run(cancel));
        (RelayHandle { sender }, handle)
    }

    async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(gateway = %self.client.url(), "Notification relay started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Notification relay cancelled");
                    break;
                }
                request = self.receiver.recv() => {
                    match request {
                        Some(request) => self.dispatch(request),
                        None => {
                            tracing::info!("All relay handles dropped, notification relay shutting down");
                            break;
                        }
                    }
                }
            }
        }

        self.receiver.close();
        let mut rejected = 0usize;
        while let Ok(request) = self.receiver.try_recv() {
            let _ = request.reply.send(Err(DeliveryError::RelayClosed));
            rejected += 1;
        }
        if rejected > 0 {
            tracing::warn!(rejected, "Rejected queued notifications on shutdown");
        }
    }

    /// Format one request and spawn its delivery.
    fn dispatch(&mut self, request: SendRequest) {
        let SendRequest {
            recipient,
            messages,
            reply,
        } = request;

        let notification = match format_batch(&messages) {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(recipient = %recipient, error = %e, "Failed to format notification");
                let _ = reply.send(Err(e.into()));
                return;
            }
        };

        tracing::debug!(
            recipient = %recipient,
            message_count = messages.len(),
            "Formatted notification batch"
        );

        self.last_sent.insert(recipient.clone(), Utc::now());

        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = client
                .send(
                    &recipient,
                    &notification.title,
                    &notification.body,
                    notification.collapse_duplicates,
                )
                .await;

            // The caller may have stopped listening; the result is dropped then.
            let _ = reply.send(result);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
