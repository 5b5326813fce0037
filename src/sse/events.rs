//! SSE line types.

/// Value of a `data` field that marks the graceful end of a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Name of the only field this client accepts.
pub const DATA_FIELD: &str = "data";

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Blank line - event separator
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
    /// `name: value` field, both sides trimmed
    Field { name: String, value: String },
    /// Non-blank line without a colon
    Malformed(String),
}
