//! Byte-budget truncation for notification text.
//!
//! The gateway caps the size of a notification, so titles and bodies are cut
//! to a UTF-8 byte length rather than a character count. Truncation walks
//! extended grapheme clusters so that neither multi-byte code points nor
//! combining sequences are ever split.

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "\u{2026}";

/// UTF-8 length of [`ELLIPSIS`], reserved out of every truncation budget.
pub const ELLIPSIS_BYTES: usize = ELLIPSIS.len();

/// Truncate `s` so that its UTF-8 encoding fits in `limit` bytes.
///
/// Text that already fits is returned unchanged. Otherwise whole graphemes
/// are kept while they fit in `limit - ELLIPSIS_BYTES`, followed by a single
/// [`ELLIPSIS`]. When `limit` is smaller than the ellipsis itself the result
/// is empty; at exactly `ELLIPSIS_BYTES` it is the ellipsis alone.
///
/// The result never exceeds `limit` bytes.
///
/// # Examples
///
/// ```
/// use pingrelay_core::truncation::truncate_to_bytes;
///
/// assert_eq!(truncate_to_bytes("Hello", 5), "Hello");
/// assert_eq!(truncate_to_bytes("Hello, world", 8), "Hello\u{2026}");
/// assert_eq!(truncate_to_bytes("Hello", 2), "");
/// ```
pub fn truncate_to_bytes(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }

    let Some(budget) = limit.checked_sub(ELLIPSIS_BYTES) else {
        return String::new();
    };

    let mut truncated = String::with_capacity(limit);
    for grapheme in s.graphemes(true) {
        if truncated.len() + grapheme.len() > budget {
            break;
        }
        truncated.push_str(grapheme);
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
