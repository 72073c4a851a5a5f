use adf_babel::formats::adf::{from_value, to_value, AdfOptions};
use adf_babel::model::{BlockNode, InlineNode, Mark, Text};
use adf_babel::{parse_markdown, render_markdown, FormatRegistry};
use insta::assert_snapshot;
use serde_json::{json, Value};

fn md_to_adf(md: &str) -> Value {
    to_value(&parse_markdown(md), &AdfOptions::default()).expect("no pending media")
}

#[test]
fn test_markdown_to_wire_json() {
    assert_eq!(
        md_to_adf("# Hi\n\n2. a **b**\n\n---"),
        json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Hi"}]},
                {"type": "orderedList", "attrs": {"order": 2}, "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [
                            {"type": "text", "text": "a "},
                            {"type": "text", "text": "b", "marks": [{"type": "strong"}]}
                        ]}
                    ]}
                ]},
                {"type": "rule"}
            ]
        })
    );
}

#[test]
fn test_tables_carry_layout_attrs() {
    let value = md_to_adf("| A |\n| --- |\n| 1 |");
    let table = &value["content"][0];
    assert_eq!(table["type"], "table");
    assert_eq!(
        table["attrs"],
        json!({"isNumberColumnEnabled": false, "layout": "default"})
    );
    assert_eq!(table["content"][0]["content"][0]["type"], "tableHeader");
    assert_eq!(table["content"][1]["content"][0]["type"], "tableCell");
}

#[test]
fn test_inline_nodes_to_wire_json() {
    let value = md_to_adf("{user:abc} {status:Live|color=green} {card:https://a.b} <sub>2</sub>");
    let content = &value["content"][0]["content"];
    assert_eq!(content[0], json!({"type": "mention", "attrs": {"id": "abc", "text": "@abc"}}));
    assert_eq!(content[2]["attrs"]["text"], "Live");
    assert_eq!(content[2]["attrs"]["color"], "green");
    assert!(content[2]["attrs"]["localId"].is_string());
    assert_eq!(content[4], json!({"type": "inlineCard", "attrs": {"url": "https://a.b"}}));
    assert_eq!(
        content[6],
        json!({"type": "text", "text": "2", "marks": [{"type": "subsup", "attrs": {"type": "sub"}}]})
    );
}

#[test]
fn test_wire_json_to_markdown() {
    let value = json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "paragraph", "content": [
                {"type": "text", "text": "Hello "},
                {"type": "text", "text": "world", "marks": [{"type": "strong"}]},
                {"type": "text", "text": " "},
                {"type": "mention", "attrs": {"id": "abc", "text": "@Ann"}}
            ]},
            {"type": "panel", "attrs": {"panelType": "note"}, "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Due "},
                    {"type": "date", "attrs": {"timestamp": "1704067200000"}},
                    {"type": "text", "text": " "},
                    {"type": "status", "attrs": {"text": "In progress", "color": "blue", "localId": "s1"}},
                    {"type": "text", "text": " "},
                    {"type": "emoji", "attrs": {"shortName": ":tada:", "text": "🎉"}}
                ]}
            ]},
            {"type": "codeBlock", "attrs": {"language": "rust"}, "content": [
                {"type": "text", "text": "fn main() {}"}
            ]},
            {"type": "taskList", "attrs": {"localId": "t"}, "content": [
                {"type": "taskItem", "attrs": {"localId": "t1", "state": "DONE"}, "content": [
                    {"type": "text", "text": "ship it"}
                ]}
            ]}
        ]
    });
    let doc = from_value(&value).unwrap();
    assert_snapshot!(render_markdown(&doc), @r"
    Hello **world** @[Ann](accountId:abc)

    ~~~panel type=note
    Due {date:2024-01-01} {status:In progress|color=blue} :tada:
    ~~~

    ```rust
    fn main() {}
    ```

    - [x] ship it
    ");
}

#[test]
fn test_wire_json_round_trips_through_markdown() {
    let value = json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "Notes"}]},
            {"type": "bulletList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [
                        {"type": "text", "text": "see "},
                        {"type": "text", "text": "docs", "marks": [{"type": "link", "attrs": {"href": "https://docs.rs"}}]}
                    ]}
                ]}
            ]},
            {"type": "expand", "attrs": {"title": "More"}, "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "x", "marks": [{"type": "code"}]}]}
            ]},
            {"type": "mediaSingle", "attrs": {"layout": "center"}, "content": [
                {"type": "media", "attrs": {"id": "m1", "collection": "c", "type": "file", "alt": "shot"}}
            ]}
        ]
    });
    let doc = from_value(&value).unwrap();
    let reparsed = parse_markdown(&render_markdown(&doc));
    assert_eq!(reparsed, doc);
    assert_eq!(to_value(&reparsed, &AdfOptions::default()).unwrap(), value);
}

#[test]
fn test_reading_is_permissive() {
    let value = json!({
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 0}, "content": [{"type": "text", "text": "low"}]},
            {"type": "panel", "content": []},
            {"type": "bodiedExtension", "content": []},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "kept", "marks": [{"type": "annotation"}, {"type": "strike"}]},
                {"type": "inlineExtension"}
            ]}
        ]
    });
    let doc = from_value(&value).unwrap();
    assert_eq!(doc.blocks.len(), 3);
    match &doc.blocks[0] {
        BlockNode::Heading(heading) => assert_eq!(heading.level, 1),
        other => panic!("Expected heading, got {other:?}"),
    }
    match &doc.blocks[1] {
        BlockNode::Panel(panel) => assert_eq!(panel.panel_type, "info"),
        other => panic!("Expected panel, got {other:?}"),
    }
    match &doc.blocks[2] {
        BlockNode::Paragraph(paragraph) => assert_eq!(
            paragraph.inline,
            vec![InlineNode::Text(Text::marked("kept", Mark::Strike))]
        ),
        other => panic!("Expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_registry_converts_between_formats() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("Plain *text*", "markdown").unwrap();
    let json = registry.serialize(&doc, "adf").unwrap();
    let back = registry.parse(&json, "adf").unwrap();
    assert_eq!(registry.serialize(&back, "markdown").unwrap(), "Plain *text*");
}

#[test]
fn test_compact_output() {
    let mut options = std::collections::HashMap::new();
    options.insert("pretty".to_string(), "false".to_string());
    let json = FormatRegistry::default()
        .serialize_with_options(&parse_markdown("x"), "adf", &options)
        .unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with('{'));
}
