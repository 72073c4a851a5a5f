//! Format implementations
//!
//! This module contains the format implementations that convert between the
//! document model and its text representations.

pub mod adf;
pub mod icons;
pub mod markdown;
pub mod treeviz;

pub use adf::{AdfFormat, AdfOptions};
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
