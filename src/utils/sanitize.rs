//! Utilities for sanitizing error messages before they are rendered.
//!
//! The text and calendar encodings are line and tab oriented, so error text
//! coming from sockets, TLS libraries or registries must not carry control
//! characters into them. Long messages are truncated.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Sanitizes a message for use as a single output field.
///
/// Control characters (including tabs and line breaks) are replaced by a
/// space, runs of whitespace collapse into one space, and the result is
/// truncated to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// # Arguments
///
/// * `message` - The message to sanitize
///
/// # Returns
///
/// A single-line version of the message.
pub fn sanitize_field(message: &str) -> String {
    let single_line: String = message
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = single_line.split_whitespace().collect::<Vec<_>>().join(" ");

    let char_count = collapsed.chars().count();
    if char_count > MAX_ERROR_MESSAGE_LENGTH {
        let truncated: String = collapsed
            .chars()
            .take(MAX_ERROR_MESSAGE_LENGTH.saturating_sub(3))
            .collect();
        format!("{truncated}...")
    } else {
        collapsed
    }
}
