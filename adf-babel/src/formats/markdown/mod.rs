//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the document model and
//! the extended markdown dialect used for editing ADF documents as plain text.
//!
//! # Library Choice
//!
//! The dialect is line oriented and has its own fences and inline tokens, so there
//! is no markdown crate underneath. Block parsing is a hand-written line scanner;
//! inline parsing is a table of `regex` patterns (see [`inline`]).
//!
//! # Element Mapping Table
//!
//! | Model Element  | Markdown Equivalent                          | Export Notes                          | Import Notes                              |
//! |----------------|----------------------------------------------|---------------------------------------|-------------------------------------------|
//! | Paragraph      | Text lines                                   | `textAlign` → metadata comment        | Lines up to a blank line or block start   |
//! | Heading        | `#` … `######` + space                       | `id`/`textAlign` → metadata comment   | Deeper than 6 clamps to 6; `#x` is text   |
//! | BulletList     | `- item` (`*`, `+` accepted)                 | Always `-`                            | Markers mix within one list               |
//! | OrderedList    | `1. item`                                    | Numbered from start order             | Start order from the first marker         |
//! | TaskList       | `- [ ] todo` / `- [x] done`                  | Direct                                | `[X]` accepted                            |
//! | CodeBlock      | ```` ```lang ````                            | Direct                                | Unknown `~~~name` fences land here too    |
//! | Blockquote     | `> text`                                     | Empty lines as bare `>`               | Body parsed recursively                   |
//! | Rule           | `---`                                        | Always `---`                          | `***` and `___` accepted                  |
//! | Panel          | `~~~panel type=info`                         | Direct                                | Type defaults to `info`                   |
//! | Expand         | `~~~expand title="…"`                        | Bare `~~~expand` without title        | Body parsed recursively                   |
//! | Table          | Pipe rows + `---` separator                  | Rows padded, `\|` escaped             | First row is the header                   |
//! | MediaSingle    | `~~~mediaSingle layout=… width=…` or `![]()` | Always fenced                         | Non-attachment sources become pending     |
//! | MediaGroup     | `~~~mediaGroup`                              | One image per line                    | Every image in the body                   |
//! | Inline:        |                                              |                                       |                                           |
//! |   Mention      | `@[Name](accountId:ID)`                      | Direct                                | `{user:ID}` accepted                      |
//! |   Date         | `{date:2024-01-01}`                          | Milliseconds → date                   | Dates and RFC 3339 → milliseconds         |
//! |   Status       | `{status:TEXT\|color=C}`                     | Direct                                | Direct                                    |
//! |   InlineCard   | `{card:URL}`                                 | Direct                                | Direct                                    |
//! |   Emoji        | `:shortcode:`                                | Glyph when no short name              | Direct                                    |
//! |   Marks        | `**` `*` `~~` `` ` `` `[]()` `<u>` `<sub>` `<sup>` `{color:…}` | Fixed nesting order | One mark per span, `***x***` for both |
//!
//! # Lossy Conversions
//!
//! - Hard breaks come back as plain newlines inside a text node
//! - Background colour is written as `<mark>` but not read back
//! - Blocks other than paragraphs and lists inside list items are flattened to text
//! - Task lists nested in task lists are flattened
//! - Whitespace is normalised: blank runs collapse, trailing spaces go
//!
//! # Pending Media
//!
//! An image whose source is not a `jira-media:id:collection:type` reference is
//! parsed into a pending media node (see `model::media`) and rendered back with
//! its original source, so a parse/render cycle never invents an attachment.

pub mod inline;
mod lists;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

pub use inline::parse_inline;
pub use parser::parse_markdown;
pub use serializer::{render_inline, render_markdown};

/// Format implementation for extended Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Extended Markdown with panels, expands, media, mentions and status tokens"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(render_markdown(doc))
    }
}
