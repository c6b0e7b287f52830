//! Loading message batches handed to the agent.
//!
//! The host writes the batch as a JSON array of message summaries, either to
//! a file passed on the command line or to the agent's stdin.

use std::io::Read;
use std::path::Path;

use pingrelay_core::MessageSummary;

/// Error type for batch loading failures.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The batch file or stdin could not be read.
    #[error("Failed to read message batch: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a JSON array of message summaries.
    #[error("Malformed message batch: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON array of message summaries.
pub fn parse_messages(raw: &str) -> Result<Vec<MessageSummary>, InputError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read a batch from `path`, or from stdin when no path is given.
pub fn read_messages(path: Option<&Path>) -> Result<Vec<MessageSummary>, InputError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_messages(&raw)
}
