//! Peer error text extraction.
//!
//! Peers that fail a proposal outside the response envelope report a
//! free-form error string such as
//! `Error: chaincode error (status: 500, message: Asset 1 already exists)`.
//! The useful part follows the first `message: ` marker, minus one
//! trailing `)` when present.

/// Marker preceding the chaincode's own text.
pub const MESSAGE_MARKER: &str = "message: ";

/// Extract the chaincode message from a raw peer error.
///
/// Text without the marker is returned unchanged.
pub fn extract_message(raw: &str) -> String {
    let Some(start) = raw.find(MESSAGE_MARKER) else {
        return raw.to_string();
    };
    let rest = &raw[start + MESSAGE_MARKER.len()..];
    let segment = match rest.find(MESSAGE_MARKER) {
        Some(end) => &rest[..end],
        None => rest,
    };
    segment.strip_suffix(')').unwrap_or(segment).to_string()
}
