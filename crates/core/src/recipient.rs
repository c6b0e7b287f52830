//! Recipient address validation.
//!
//! The gateway identifies a device by the e-mail address it was registered
//! with. Addresses are checked before the relay is enabled so that a typo
//! surfaces as a configuration error rather than a silent 4xx from the gateway.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Whole-string pattern for an acceptable recipient address.
const RECIPIENT_PATTERN: &str = r"\A[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\z";

static RECIPIENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECIPIENT_PATTERN).expect("valid regex"));

/// Returns `true` when `address` (already trimmed) looks like an e-mail address.
pub fn is_valid_recipient(address: &str) -> bool {
    RECIPIENT_RE.is_match(address)
}

/// Trim surrounding whitespace and validate the address.
pub fn normalize_recipient(raw: &str) -> Result<String, CoreError> {
    let address = raw.trim();
    if !is_valid_recipient(address) {
        return Err(CoreError::Validation(format!(
            "'{address}' is not a valid recipient address"
        )));
    }
    Ok(address.to_string())
}
