//! Clan tag encodings.
//!
//! The two proxy routes encode tags differently and must keep doing so:
//! `/api/clan/:tag` only escapes the `#` marker, while `/api/clash`
//! percent-encodes the whole tag. Unifying them would change the paths
//! sent upstream.

use std::borrow::Cow;

/// Replace the first `#` with `%23`, leaving every other character as-is.
#[must_use]
pub fn escape_marker(tag: &str) -> String {
    tag.replacen('#', "%23", 1)
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ~`.
#[must_use]
pub fn encode_full(tag: &str) -> Cow<'_, str> {
    urlencoding::encode(tag)
}
