//! Round-trip properties between parsing and rendering

use adf_babel::common::normalize_whitespace;
use adf_babel::model::{
    Blockquote, BlockNode, BulletList, CodeBlock, Document, Heading, InlineNode, ListItem,
    MediaNode, MediaSingle, OrderedList, Panel, Paragraph, Table, TableCell, TableRow, TaskItem,
    TaskList, TaskState,
};
use adf_babel::{parse_markdown, render_markdown};
use proptest::prelude::*;

const KITCHEN_SINK: &str = r#"<!-- adf:heading id="top" -->
# Kitchen sink

Intro with **bold**, *em*, `code`, ~~gone~~ and a [link](https://example.com "Example").

- one
  - nested
- two

3. three
4. four

- [ ] todo
- [x] done

> quoted
>
> more

~~~panel type=warning
Careful
~~~

~~~expand title="Details"
Hidden text
~~~

| A | B |
| --- | --- |
| 1 | 2 |

~~~mediaSingle layout=center width=300
![cat](https://x/cat.png)
~~~

Meet @[Ann](accountId:abc) on {date:2024-01-01} {status:DONE|color=green} :smile:

---
"#;

fn roundtrip(source: &str) -> String {
    render_markdown(&parse_markdown(source))
}

#[test]
fn test_render_is_idempotent() {
    let once = roundtrip(KITCHEN_SINK);
    let twice = roundtrip(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_kitchen_sink_keeps_its_blocks() {
    let doc = parse_markdown(KITCHEN_SINK);
    let kinds: Vec<_> = doc.blocks.iter().map(BlockNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "Heading",
            "Paragraph",
            "BulletList",
            "OrderedList",
            "TaskList",
            "Blockquote",
            "Panel",
            "Expand",
            "Table",
            "MediaSingle",
            "Paragraph",
            "Rule",
        ]
    );
    match &doc.blocks[4] {
        BlockNode::TaskList(tasks) => {
            let states: Vec<_> = tasks.items.iter().map(|t| t.state).collect();
            assert_eq!(states, vec![TaskState::Todo, TaskState::Done]);
        }
        other => panic!("Expected task list, got {other:?}"),
    }
}

#[test]
fn test_kitchen_sink_source_survives() {
    let output = roundtrip(KITCHEN_SINK);
    for line in [
        "<!-- adf:heading id=\"top\" -->",
        "Intro with **bold**, *em*, `code`, ~~gone~~ and a [link](https://example.com \"Example\").",
        "- one\n  - nested\n- two",
        "3. three\n4. four",
        "> quoted\n>\n> more",
        "~~~expand title=\"Details\"\nHidden text\n~~~",
        "~~~mediaSingle layout=center width=300 widthType=pixel\n![cat](https://x/cat.png)\n~~~",
        "Meet @[Ann](accountId:abc) on {date:2024-01-01} {status:DONE|color=green} :smile:",
    ] {
        assert!(output.contains(line), "missing {line:?} in:\n{output}");
    }
}

#[test]
fn test_list_nesting_round_trip() {
    let source = "- Item 1\n  - Nested\n- Item 2";
    let doc = parse_markdown(source);
    match &doc.blocks[0] {
        BlockNode::BulletList(list) => {
            assert_eq!(list.items.len(), 2);
            match &list.items[0].blocks[1] {
                BlockNode::BulletList(nested) => assert_eq!(nested.items.len(), 1),
                other => panic!("Expected nested list, got {other:?}"),
            }
        }
        other => panic!("Expected list, got {other:?}"),
    }
    assert_eq!(render_markdown(&doc), source);
}

#[test]
fn test_pending_media_round_trips_as_pending() {
    let source = "~~~mediaSingle layout=align-start\n![cat](https://x/cat.png)\n~~~";
    let output = roundtrip(source);
    assert_eq!(output, source);
    assert_eq!(parse_markdown(&output).pending_media().len(), 1);
}

#[test]
fn test_blank_runs_collapse() {
    assert_eq!(roundtrip("one\n\n\n\n\ntwo   \n"), "one\n\ntwo");
}

#[test]
fn test_blank_separated_lists_stay_apart() {
    let source = "- a\n\n- b\n\n1. c\n\n1. d";
    let output = roundtrip(source);
    assert_eq!(output, source);
    let kinds: Vec<_> = parse_markdown(&output)
        .blocks
        .iter()
        .map(BlockNode::kind)
        .collect();
    assert_eq!(
        kinds,
        vec!["BulletList", "BulletList", "OrderedList", "OrderedList"]
    );
}

#[test]
fn test_empty_items_are_stable() {
    let once = roundtrip("- \n- b\n\n1. \n2. c\n\n- [ ] \n- [x] d");
    assert_eq!(once, "-\n- b\n\n1.\n2. c\n\n- [ ]\n- [x] d");
    assert_eq!(roundtrip(&once), once);
}

#[test]
fn test_media_single_attributes_are_explicit() {
    let doc = Document::new(vec![BlockNode::MediaSingle(MediaSingle {
        layout: String::new(),
        width: Some(300.0),
        width_type: None,
        media: MediaNode::pending("./cat.png", "cat"),
    })]);
    let once = render_markdown(&doc);
    assert_eq!(
        once,
        "~~~mediaSingle layout=align-start width=300 widthType=pixel\n![cat](./cat.png)\n~~~"
    );
    assert_eq!(roundtrip(&once), once);
}

#[test]
fn test_heading_with_break_stays_one_heading() {
    let doc = Document::new(vec![BlockNode::Heading(Heading::new(
        1,
        vec![
            InlineNode::text("Release"),
            InlineNode::HardBreak,
            InlineNode::text("notes"),
        ],
    ))]);
    let once = render_markdown(&doc);
    assert_eq!(once, "# Release notes");
    assert_eq!(parse_markdown(&once).blocks.len(), 1);
}

fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..=max).prop_map(|words| words.join(" "))
}

fn maybe_words(max: usize) -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), words(max)]
}

fn inline(text: String) -> Vec<InlineNode> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![InlineNode::text(text)]
    }
}

fn para(text: String) -> BlockNode {
    BlockNode::Paragraph(Paragraph::new(inline(text)))
}

fn list(ordered: bool, start_order: u32, items: Vec<ListItem>) -> BlockNode {
    if ordered {
        BlockNode::OrderedList(OrderedList { start_order, items })
    } else {
        BlockNode::BulletList(BulletList { items })
    }
}

fn flat_list() -> impl Strategy<Value = BlockNode> {
    (any::<bool>(), 1u32..5, prop::collection::vec(words(3), 1..3)).prop_map(
        |(ordered, start, texts)| {
            let items = texts
                .into_iter()
                .map(|text| ListItem {
                    blocks: vec![para(text)],
                })
                .collect();
            list(ordered, start, items)
        },
    )
}

/// Items with an optional nested list and an optional trailing paragraph.
fn list_block() -> impl Strategy<Value = BlockNode> {
    let item = (
        maybe_words(3),
        prop::option::of(flat_list()),
        prop::option::of(words(3)),
    )
        .prop_map(|(head, nested, after)| {
            let mut blocks = vec![para(head)];
            blocks.extend(nested);
            blocks.extend(after.map(para));
            ListItem { blocks }
        });
    (any::<bool>(), 1u32..5, prop::collection::vec(item, 1..4))
        .prop_map(|(ordered, start, items)| list(ordered, start, items))
}

fn task_list() -> impl Strategy<Value = BlockNode> {
    prop::collection::vec((any::<bool>(), maybe_words(3)), 1..4).prop_map(|tasks| {
        let items = tasks
            .into_iter()
            .enumerate()
            .map(|(n, (done, text))| TaskItem {
                local_id: format!("task-{n}"),
                state: if done { TaskState::Done } else { TaskState::Todo },
                inline: inline(text),
            })
            .collect();
        BlockNode::TaskList(TaskList {
            local_id: "tasks".to_string(),
            items,
        })
    })
}

fn heading() -> impl Strategy<Value = BlockNode> {
    (1usize..=6, words(3), prop::option::of(words(2))).prop_map(|(level, text, second)| {
        let mut inline = vec![InlineNode::text(text)];
        if let Some(second) = second {
            inline.push(InlineNode::HardBreak);
            inline.push(InlineNode::text(second));
        }
        BlockNode::Heading(Heading::new(level, inline))
    })
}

fn code_block() -> impl Strategy<Value = BlockNode> {
    (
        prop_oneof![Just(String::new()), "[a-z]{1,6}"],
        prop::collection::vec(words(4), 0..3),
    )
        .prop_map(|(language, lines)| {
            BlockNode::CodeBlock(CodeBlock {
                language,
                text: lines.join("\n"),
            })
        })
}

fn container() -> impl Strategy<Value = BlockNode> {
    let paragraphs = || prop::collection::vec(words(4).prop_map(para), 1..3);
    prop_oneof![
        paragraphs().prop_map(|blocks| BlockNode::Blockquote(Blockquote { blocks })),
        (
            prop_oneof![Just("info"), Just("note"), Just("warning"), Just("success")],
            paragraphs(),
        )
            .prop_map(|(panel_type, blocks)| BlockNode::Panel(Panel {
                panel_type: panel_type.to_string(),
                blocks,
            })),
    ]
}

fn table() -> impl Strategy<Value = BlockNode> {
    (1usize..4)
        .prop_flat_map(|columns| prop::collection::vec(prop::collection::vec(words(2), columns), 1..4))
        .prop_map(|rows| {
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(n, cells)| TableRow {
                    cells: cells
                        .into_iter()
                        .map(|text| TableCell {
                            is_header: n == 0,
                            blocks: vec![para(text)],
                        })
                        .collect(),
                })
                .collect();
            BlockNode::Table(Table { rows })
        })
}

fn media_single() -> impl Strategy<Value = BlockNode> {
    (
        prop_oneof![Just(""), Just("center"), Just("align-start"), Just("wide")],
        prop::option::of(0.0f64..2000.0),
        prop::option::of(prop_oneof![Just(""), Just("pixel"), Just("percentage")]),
        any::<bool>(),
        "[a-z]{1,8}",
        prop_oneof![Just(String::new()), "[a-z]{1,8}"],
    )
        .prop_map(|(layout, width, width_type, pending, name, alt)| {
            let media = if pending {
                MediaNode::pending(&format!("./{name}.png"), &alt)
            } else {
                MediaNode {
                    id: name,
                    collection: Some("files".to_string()),
                    media_type: "file".to_string(),
                    alt,
                    pending_source: None,
                }
            };
            BlockNode::MediaSingle(MediaSingle {
                layout: layout.to_string(),
                width,
                width_type: width_type.map(str::to_string),
                media,
            })
        })
}

fn block() -> impl Strategy<Value = BlockNode> {
    prop_oneof![
        heading(),
        words(6).prop_map(para),
        list_block(),
        task_list(),
        code_block(),
        Just(BlockNode::Rule),
        container(),
        table(),
        media_single(),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 1..6).prop_map(Document::new)
}

proptest! {
    #[test]
    fn rendered_documents_reparse_to_the_same_markdown(doc in document()) {
        let once = render_markdown(&doc);
        prop_assert_eq!(roundtrip(&once), once);
    }

    #[test]
    fn rendered_documents_keep_their_top_level_blocks(doc in document()) {
        let reparsed = parse_markdown(&render_markdown(&doc));
        let kinds = |doc: &Document| doc.blocks.iter().map(BlockNode::kind).collect::<Vec<_>>();
        prop_assert_eq!(kinds(&reparsed), kinds(&doc));
    }

    #[test]
    fn plain_paragraph_round_trips(words in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let source = words.join(" ");
        prop_assert_eq!(roundtrip(&source), normalize_whitespace(&source));
    }

    #[test]
    fn plain_paragraphs_render_idempotently(
        paragraphs in prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 1..6), 1..5)
    ) {
        let source = paragraphs
            .iter()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join("\n\n\n");
        let once = roundtrip(&source);
        prop_assert_eq!(roundtrip(&once), once);
    }
}
