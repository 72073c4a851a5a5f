//! Attribute strings used by fences and metadata comments.
//!
//! Pairs are written `key="value"` or `key=value`, separated by whitespace.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub type Attrs = HashMap<String, String>;

static ATTR_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)=(?:"([^"]*)"|([^\s"]+))"#).unwrap());

/// Parses a whitespace separated attribute string. Text that is not a pair is ignored.
pub fn parse_attrs(input: &str) -> Attrs {
    ATTR_PAIR_RE
        .captures_iter(input)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Formats the listed keys, in order, as ` key="value"` pairs.
///
/// Missing and empty values are skipped. The result carries a leading space so
/// it can be appended to a fence name or comment tag; it is empty when nothing
/// was written.
pub fn format_attrs(attrs: &Attrs, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| {
            attrs
                .get(*key)
                .filter(|value| !value.is_empty())
                .map(|value| format!(" {key}=\"{value}\""))
        })
        .collect()
}

/// Parses the `color=blue,key=value` tail of a status token.
pub fn split_status_attrs(input: &str) -> Attrs {
    input
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
