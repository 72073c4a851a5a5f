//! Document model
//!
//! The typed tree both pipelines meet in. The markdown parser builds it, the
//! markdown renderer and the wire JSON codec consume it, and the JSON codec can
//! build it as well.
//!
//! A tree is built fresh by every parse and read by every render. The only
//! mutation after parsing is the resolution of pending media (see [`media`]).

pub mod media;
pub mod nodes;

pub use media::MEDIA_SCHEME;
pub use nodes::*;
