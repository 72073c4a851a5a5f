//! Shared helpers used by both the markdown parser and the renderer.
//!
//! Everything here is a pure function except identifier generation, which reads
//! the clock and the process random source.

pub mod attrs;
pub mod escape;
pub mod ids;
pub mod timestamp;
pub mod whitespace;

pub use attrs::{format_attrs, parse_attrs, split_status_attrs, Attrs};
pub use escape::{escape_markdown, unescape_markdown};
pub use ids::{generate_local_id, is_pending_media_id, pending_media_id, PENDING_PREFIX};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use whitespace::{indent_level, is_all_digits, normalize_whitespace, trim_indent};
