use adf_babel::formats::adf::{from_value, to_string, to_value, AdfOptions};
use adf_babel::{parse_markdown, render_markdown, FormatError, FormatRegistry};
use std::collections::HashMap;

const WITH_PENDING: &str = "~~~expand title=\"Screens\"\n![login](./login.png)\n~~~";

#[test]
fn test_pending_media_blocks_serialization() {
    let doc = parse_markdown(WITH_PENDING);
    assert_eq!(
        to_string(&doc, &AdfOptions::default()),
        Err(FormatError::PendingMedia("./login.png".to_string()))
    );
    assert!(FormatRegistry::default().serialize(&doc, "adf").is_err());
}

#[test]
fn test_resolved_media_serializes() {
    let mut doc = parse_markdown(WITH_PENDING);
    for media in doc.pending_media_mut() {
        media.resolve("f00d", "contentId-1");
    }
    assert!(doc.pending_media().is_empty());

    let value = to_value(&doc, &AdfOptions::default()).unwrap();
    let media = &value["content"][0]["content"][0]["content"][0];
    assert_eq!(media["type"], "media");
    assert_eq!(media["attrs"]["id"], "f00d");
    assert_eq!(media["attrs"]["collection"], "contentId-1");
    assert_eq!(media["attrs"]["alt"], "login");
    assert!(media["attrs"].get("_source").is_none());

    assert_eq!(
        render_markdown(&doc),
        "~~~expand title=\"Screens\"\n~~~mediaSingle layout=align-start\n![login](jira-media:f00d:contentId-1:file)\n~~~\n~~~"
    );
}

#[test]
fn test_pending_media_kept_when_allowed() {
    let mut options = HashMap::new();
    options.insert("allow-pending-media".to_string(), "true".to_string());
    let registry = FormatRegistry::default();

    let json = registry
        .serialize_with_options(&parse_markdown(WITH_PENDING), "adf", &options)
        .unwrap();
    let back = registry.parse(&json, "adf").unwrap();
    let pending = back.pending_media();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].pending_source.as_deref(), Some("./login.png"));
    assert_eq!(render_markdown(&back), render_markdown(&parse_markdown(WITH_PENDING)));
}

#[test]
fn test_unknown_options_are_rejected() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "dark".to_string());
    let result =
        FormatRegistry::default().serialize_with_options(&parse_markdown("x"), "adf", &options);
    assert!(matches!(result, Err(FormatError::NotSupported(_))));
}

#[test]
fn test_plain_wire_media_is_never_pending() {
    let value = serde_json::json!({
        "type": "doc",
        "content": [{"type": "mediaGroup", "content": [
            {"type": "media", "attrs": {"id": "a", "type": "file", "collection": "c"}}
        ]}]
    });
    assert!(from_value(&value).unwrap().pending_media().is_empty());
}
