//! Notification batching and formatting.
//!
//! Turns an ordered batch of [`MessageSummary`] values into the title and body
//! of a single push notification. The gateway limits the notification to
//! [`TOTAL_BYTE_LIMIT`] bytes, which is split evenly across the messages of
//! the batch so that one long message cannot starve the others.
//!
//! - One message: `"iMessage - {sender}"` as the title, the message display
//!   text as the body.
//! - Several messages (a digest): `"iMessage ({count})"` as the title and one
//!   `sender\ntext` segment per message, in input order.

use crate::error::CoreError;
use crate::message::MessageSummary;
use crate::truncation::truncate_to_bytes;

/// Byte budget shared by the title and all message bodies of a notification.
pub const TOTAL_BYTE_LIMIT: usize = 245;

/// Title prefix identifying the source application.
pub const TITLE_PREFIX: &str = "iMessage";

// ---------------------------------------------------------------------------
// FormattedNotification
// ---------------------------------------------------------------------------

/// Title and body ready to be handed to the delivery client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedNotification {
    pub title: String,
    pub body: String,
    /// Whether the receiving device may collapse this notification with an
    /// identical earlier one. Digests are never collapsed.
    pub collapse_duplicates: bool,
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a batch of messages into a single notification.
///
/// Returns [`CoreError::EmptyBatch`] when `messages` is empty. The function
/// is pure: the same input always yields the same output.
pub fn format_batch(messages: &[MessageSummary]) -> Result<FormattedNotification, CoreError> {
    if messages.is_empty() {
        return Err(CoreError::EmptyBatch);
    }

    let per_message_limit = TOTAL_BYTE_LIMIT / messages.len();

    match messages {
        [message] => Ok(format_single(message, per_message_limit)),
        _ => Ok(format_digest(messages, per_message_limit)),
    }
}

fn format_single(message: &MessageSummary, per_message_limit: usize) -> FormattedNotification {
    let title = format!("{TITLE_PREFIX} - {}", message.sender_name());

    FormattedNotification {
        title: truncate_to_bytes(&title, TOTAL_BYTE_LIMIT),
        body: truncate_to_bytes(message.display_text(), per_message_limit),
        collapse_duplicates: true,
    }
}

fn format_digest(messages: &[MessageSummary], per_message_limit: usize) -> FormattedNotification {
    let title = format!("{TITLE_PREFIX} ({})", messages.len());

    let mut body = String::new();
    for message in messages {
        let sender = message.sender_name();
        // Sender line plus its newline come out of the message's share.
        let sender_bytes = sender.len() + 1;
        let available = per_message_limit.saturating_sub(sender_bytes);
        let text = truncate_to_bytes(message.display_text(), available);

        body.push_str(sender);
        body.push('\n');
        body.push_str(&text);
        body.push('\n');
    }

    FormattedNotification {
        title: truncate_to_bytes(&title, TOTAL_BYTE_LIMIT),
        body: body.trim().to_string(),
        collapse_duplicates: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
