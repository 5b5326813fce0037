//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the event stream returned by the inference endpoint. Only the
//! subset of SSE this API uses is supported:
//! - `data: <json>` - one JSON payload per line
//! - `data: [DONE]` - graceful end of stream
//! - Lines starting with `:` - comments (ignored)
//! - Empty line - event separator (ignored)
//!
//! # Module structure
//! - `events` - Line types and protocol constants
//! - `line` - Line splitting and classification
//! - `reader` - `EventReader`, the pull-based typed decoder

mod events;
mod line;
mod reader;

pub use events::{SseLine, DATA_FIELD, DONE_SENTINEL};
pub use line::{classify_line, parse_sse_line, LineBuffer, MAX_LINE_BYTES};
pub use reader::EventReader;
