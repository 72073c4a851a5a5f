//! CLI-specific transforms
//!
//! This module defines the views `adf inspect` can print for a markdown
//! source. Each transform is a stage + format combination (e.g., "ast-treeviz").
//!
//! ## Transform Pipeline
//!
//! 1. **Parsing** - Markdown text → Document model
//!    - `ast-treeviz`: Tree visualization with Unicode icons (default)
//!    - `ast-json`: The model dumped as JSON
//!
//! 2. **Serialization** - Document model → output text
//!    - `adf-json`: Wire JSON, with unresolved local images kept as pending media
//!    - `md-roundtrip`: The markdown the renderer produces for the parsed model
//!
//! ## Extra Parameters
//!
//! - `include-inline`: When set to "true", `ast-treeviz` also lists inline nodes.
//!
//! Example: `adf inspect notes.md --extra-include-inline`

use adf_babel::formats::adf::{self, AdfOptions};
use adf_babel::formats::treeviz::to_treeviz_str_with_params;
use adf_babel::{parse_markdown, render_markdown};
use std::collections::HashMap;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-treeviz", "ast-json", "adf-json", "md-roundtrip"];

/// Transform used when `adf inspect` is given none.
pub const DEFAULT_TRANSFORM: &str = "ast-treeviz";

/// Execute a named transform on a markdown source with optional extra parameters
///
/// # Arguments
///
/// * `source` - The markdown text to transform
/// * `transform_name` - The transform to apply (e.g., "ast-treeviz", "adf-json")
/// * `extra_params` - Optional parameters for the transform
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_markdown(source);

    match transform_name {
        "ast-treeviz" => Ok(to_treeviz_str_with_params(&doc, extra_params)),
        "ast-json" => serde_json::to_string_pretty(&doc)
            .map(|json| json + "\n")
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "adf-json" => {
            let options = AdfOptions {
                pretty: true,
                allow_pending_media: true,
            };
            adf::to_string(&doc, &options)
                .map(|json| json + "\n")
                .map_err(|e| format!("Transform failed: {e}"))
        }
        "md-roundtrip" => Ok(render_markdown(&doc) + "\n"),
        _ => Err(format!(
            "Unknown transform: {transform_name}\nAvailable transforms: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}
