//! Tests for the shared helpers used by both conversion directions.

use adf_babel::common::*;

#[test]
fn test_timestamp_round_trip() {
    assert_eq!(format_timestamp(&parse_timestamp("2024-01-01")), "2024-01-01");
}

#[test]
fn test_timestamps_in_milliseconds_pass_through() {
    assert_eq!(parse_timestamp("1704067200000"), "1704067200000");
    assert_eq!(parse_timestamp("2024-01-01T12:00:00Z"), "1704110400000");
    assert_eq!(format_timestamp("not a number"), "not a number");
}

#[test]
fn test_escape_is_asymmetric_for_backticks() {
    let escaped = escape_markdown("`code` *bold*");
    assert_eq!(escaped, "\\`code\\` \\*bold\\*");
    assert_eq!(unescape_markdown(&escaped), "\\`code\\` *bold*");
}

#[test]
fn test_attrs_round_trip_in_key_order() {
    let attrs = parse_attrs(r#"title="Release plan" type=note ignored"#);
    assert_eq!(attrs.len(), 2);
    assert_eq!(
        format_attrs(&attrs, &["type", "title", "missing"]),
        r#" type="note" title="Release plan""#
    );
}

#[test]
fn test_local_ids_are_unique() {
    let ids: std::collections::HashSet<_> = (0..100).map(|_| generate_local_id()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_pending_media_ids() {
    let id = pending_media_id();
    assert!(id.starts_with(PENDING_PREFIX));
    assert!(is_pending_media_id(&id));
    assert!(!is_pending_media_id("abc-123"));
}

#[test]
fn test_indentation_levels() {
    assert_eq!(indent_level("    - deep"), 2);
    assert_eq!(indent_level("\t- tab"), 1);
    assert_eq!(trim_indent("    text", 1), "  text");
}
