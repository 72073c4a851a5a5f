//! Bidirectional conversion between extended Markdown and ADF documents
//!
//!     This crate turns a markdown dialect into the typed ADF document tree and back. The dialect
//!     is ordinary markdown plus fenced containers (`~~~panel`, `~~~expand`, `~~~mediaSingle`,
//!     `~~~mediaGroup`), inline tokens (`@[Name](accountId:ID)`, `{date:…}`, `{status:…}`,
//!     `{card:…}`, `:emoji:`, `{color:…}`) and HTML comments carrying block attributes
//!     (`<!-- adf:heading id="intro" -->`).
//!
//!     TLDR:
//!         - Parsing never fails. Anything the parser does not recognise degrades to text, a
//!           code block or is dropped, and a `tracing` debug event records the fallback.
//!         - Rendering never fails either. Errors only come from the registry (unknown format,
//!           unsupported direction), option validation and the wire JSON codec.
//!         - Media that is not an attachment reference becomes a pending placeholder. Pending
//!           media never reaches the wire JSON unless explicitly allowed.
//!
//! Architecture
//!
//!     The model (./model) is a set of closed enums, so both directions dispatch exhaustively.
//!     Format code only maps between text and the model; shared string handling (attribute
//!     parsing, escaping, timestamps, indentation, ids) lives in ./common and is tested in
//!     isolation there.
//!
//!     This is a pure lib, that is, it powers the adf cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it to std print, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model                   # Document tree and media placeholders
//!     ├── common                  # Attribute, escape, id, timestamp and whitespace helpers
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Block scanner
//!     │   │   ├── lists.rs        # Indentation based list nesting
//!     │   │   ├── inline.rs       # Regex inline scanner
//!     │   │   ├── serializer.rs   # Renderer
//!     │   │   └── mod.rs
//!     │   ├── adf                 # Wire JSON codec
//!     │   ├── treeviz             # Tree visualisation
//!     │   └── icons.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown/<area>.rs
//!     ├── adf/<area>.rs
//!     └── common/mod.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     Block parsing is a single forward scan over lines. Each position is classified by a fixed
//!     priority list (metadata comment, custom fence, code fence, heading, rule, quote, table,
//!     task, bullet, ordered, image, paragraph) and handed to the matching handler, which returns
//!     the node and the next line index. Lists nest by indentation, two columns per level.
//!
//!     Inline parsing repeatedly finds the earliest match among an ordered table of patterns;
//!     ties go to the pattern listed first. Rendering is the inverse, with a fixed mark order so
//!     that output does not depend on mark order in the tree, and a final whitespace
//!     normalisation so that rendering a parsed render gives the same text.
//!
//! Formats
//!
//!     - markdown: parse and serialize
//!     - adf: the host platform's JSON, parse and serialize
//!     - treeviz: serialize only, for inspection
//!
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use model::Document;
pub use registry::FormatRegistry;

/// Parses extended markdown into a document. Never fails.
pub fn parse_markdown(source: &str) -> Document {
    formats::markdown::parse_markdown(source)
}

/// Renders a document as extended markdown. Never fails.
pub fn render_markdown(doc: &Document) -> String {
    formats::markdown::render_markdown(doc)
}

/// Parses a single run of inline markdown.
pub fn parse_inline(text: &str) -> Vec<model::InlineNode> {
    formats::markdown::parse_inline(text)
}
