//! Message summaries handed to the relay by the host application.
//!
//! A [`MessageSummary`] is the minimal view of an incoming chat message the
//! relay needs: who sent it and what it contained. Attachments and stickers
//! are carried as opaque references; only their presence is inspected.

use serde::{Deserialize, Serialize};

/// Sender label used when the host could not resolve a display name.
pub const UNKNOWN_SENDER: &str = "Unknown sender";

/// Display text for a message carrying at least one attachment.
pub const PHOTO_TEXT: &str = "Sent a Photo";

/// Display text for a message carrying a sticker and no attachment.
pub const STICKER_TEXT: &str = "Sent a Sticker";

/// Display text for a message with no usable content.
pub const UNKNOWN_MESSAGE_TEXT: &str = "Unknown Message";

// ---------------------------------------------------------------------------
// MessageSummary
// ---------------------------------------------------------------------------

/// Summary of a single incoming message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    /// Sender display name, if known.
    #[serde(default)]
    pub sender: Option<String>,

    /// Plain-text body, if any.
    #[serde(default)]
    pub text: Option<String>,

    /// Attachment references (file names or GUIDs).
    #[serde(default)]
    pub attachments: Vec<String>,

    /// Sticker references.
    #[serde(default)]
    pub stickers: Vec<String>,
}

impl MessageSummary {
    /// Create a text-only message with no sender.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set the sender display name.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Append an attachment reference.
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    /// Append a sticker reference.
    pub fn with_sticker(mut self, sticker: impl Into<String>) -> Self {
        self.stickers.push(sticker.into());
        self
    }

    /// Sender name, falling back to [`UNKNOWN_SENDER`].
    pub fn sender_name(&self) -> &str {
        self.sender.as_deref().unwrap_or(UNKNOWN_SENDER)
    }

    /// Human-readable summary of the message content.
    ///
    /// First match wins: attachments, then stickers, then non-empty text,
    /// then [`UNKNOWN_MESSAGE_TEXT`].
    pub fn display_text(&self) -> &str {
        if !self.attachments.is_empty() {
            PHOTO_TEXT
        } else if !self.stickers.is_empty() {
            STICKER_TEXT
        } else {
            match self.text.as_deref() {
                Some(text) if !text.is_empty() => text,
                _ => UNKNOWN_MESSAGE_TEXT,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
