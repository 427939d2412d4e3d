//! Marker-delimited context extraction.

/// Opening marker of the useful context.
pub const START_MARKER: &str = "--START OF CONTEXT--";
/// Closing marker of the useful context.
pub const END_MARKER: &str = "--END OF CONTEXT--";

/// Returns the trimmed text between the markers.
///
/// - no start marker: extraction starts at 0, deliberately not at `START_MARKER.len()`
///   (which a "not found = -1, plus marker length" offset would give)
/// - no end marker: extraction stops before the last character
/// - end at or before start: empty
pub fn extract_context(text: &str) -> &str {
    let start = text
        .find(START_MARKER)
        .map(|i| i + START_MARKER.len())
        .unwrap_or(0);
    let end = text
        .find(END_MARKER)
        .or_else(|| text.char_indices().last().map(|(i, _)| i))
        .unwrap_or(0);
    if end <= start {
        return "";
    }
    text[start..end].trim()
}
