//! Export tests for Markdown format (Document → Markdown)

use adf_babel::format::Format;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::model::*;
use insta::assert_snapshot;

fn doc_to_md(blocks: Vec<BlockNode>) -> String {
    MarkdownFormat
        .serialize(&Document::new(blocks))
        .expect("Markdown rendering never fails")
}

fn para(inline: Vec<InlineNode>) -> BlockNode {
    BlockNode::Paragraph(Paragraph::new(inline))
}

fn item(text: &str) -> ListItem {
    ListItem {
        blocks: vec![para(vec![InlineNode::text(text)])],
    }
}

#[test]
fn test_strong_and_em_nest_as_three_stars() {
    let text = Text {
        text: "text".to_string(),
        marks: vec![Mark::Strong, Mark::Em],
    };
    assert_eq!(doc_to_md(vec![para(vec![InlineNode::Text(text)])]), "***text***");
}

#[test]
fn test_mark_order_does_not_depend_on_input_order() {
    let marks = vec![
        Mark::Underline,
        Mark::Code,
        Mark::TextColor {
            color: "#ff0000".to_string(),
        },
    ];
    let mut reversed = marks.clone();
    reversed.reverse();

    let render = |marks: Vec<Mark>| {
        doc_to_md(vec![para(vec![InlineNode::Text(Text {
            text: "x".to_string(),
            marks,
        })])])
    };
    assert_eq!(render(marks.clone()), "{color:#ff0000}<u>`x`</u>{color}");
    assert_eq!(render(marks), render(reversed));
}

#[test]
fn test_heading_attributes_become_metadata_comment() {
    let mut heading = Heading::new(2, vec![InlineNode::text("Intro")]);
    heading.id = Some("intro".to_string());
    assert_eq!(
        doc_to_md(vec![BlockNode::Heading(heading)]),
        "<!-- adf:heading id=\"intro\" -->\n## Intro"
    );
}

#[test]
fn test_ordered_list_numbers_from_start() {
    let list = BlockNode::OrderedList(OrderedList {
        start_order: 3,
        items: vec![item("c"), item("d")],
    });
    assert_eq!(doc_to_md(vec![list]), "3. c\n4. d");
}

#[test]
fn test_task_list() {
    let tasks = BlockNode::TaskList(TaskList {
        local_id: "list".to_string(),
        items: vec![
            TaskItem {
                local_id: "a".to_string(),
                state: TaskState::Todo,
                inline: vec![InlineNode::text("open")],
            },
            TaskItem {
                local_id: "b".to_string(),
                state: TaskState::Done,
                inline: vec![InlineNode::text("closed")],
            },
        ],
    });
    assert_eq!(doc_to_md(vec![tasks]), "- [ ] open\n- [x] closed");
}

#[test]
fn test_mentions_degrade_without_id() {
    let mention = |id: &str, text: &str| {
        doc_to_md(vec![para(vec![InlineNode::Mention(Mention {
            id: id.to_string(),
            display_text: text.to_string(),
        })])])
    };
    assert_eq!(mention("abc", "@Ann"), "@[Ann](accountId:abc)");
    assert_eq!(mention("", "@Ann"), "@Ann");
    assert_eq!(mention("", ""), "@unknown");
}

#[test]
fn test_emoji_prefers_short_name() {
    let emoji = |short_name: Option<&str>, text: Option<&str>| {
        doc_to_md(vec![para(vec![InlineNode::Emoji(Emoji {
            short_name: short_name.map(String::from),
            text: text.map(String::from),
        })])])
    };
    assert_eq!(emoji(Some(":tada:"), Some("🎉")), ":tada:");
    assert_eq!(emoji(None, Some("🎉")), "🎉");
}

#[test]
fn test_date_renders_as_calendar_date() {
    let date = InlineNode::Date(DateStamp {
        timestamp: "1704067200000".to_string(),
    });
    assert_eq!(doc_to_md(vec![para(vec![date])]), "{date:2024-01-01}");
}

#[test]
fn test_media_forms() {
    let resolved = MediaNode::from_source("jira-media:abc:uploads:file", "logo");
    let mut without_id = MediaNode::from_source("jira-media:abc:uploads:file", "");
    without_id.id.clear();

    let output = doc_to_md(vec![
        BlockNode::MediaSingle(MediaSingle::new(resolved)),
        BlockNode::MediaGroup(MediaGroup {
            items: vec![without_id, MediaNode::pending("./diagram.png", "diagram")],
        }),
    ]);
    assert_snapshot!(output, @r"
    ~~~mediaSingle layout=align-start
    ![logo](jira-media:abc:uploads:file)
    ~~~

    ~~~mediaGroup
    [attachment]
    ![diagram](./diagram.png)
    ~~~
    ");
}

#[test]
fn test_containers() {
    let output = doc_to_md(vec![
        BlockNode::Panel(Panel {
            panel_type: "note".to_string(),
            blocks: vec![para(vec![InlineNode::text("Heads up")])],
        }),
        BlockNode::Expand(Expand {
            title: String::new(),
            blocks: vec![BlockNode::Rule],
        }),
        BlockNode::Blockquote(Blockquote {
            blocks: vec![
                para(vec![InlineNode::text("one")]),
                para(vec![InlineNode::text("two")]),
            ],
        }),
    ]);
    assert_snapshot!(output, @r"
    ~~~panel type=note
    Heads up
    ~~~

    ~~~expand
    ---
    ~~~

    > one
    >
    > two
    ");
}

#[test]
fn test_nested_lists_indent_one_level() {
    let nested = ListItem {
        blocks: vec![
            para(vec![InlineNode::text("parent")]),
            BlockNode::OrderedList(OrderedList {
                start_order: 1,
                items: vec![item("child")],
            }),
        ],
    };
    let list = BlockNode::BulletList(BulletList {
        items: vec![nested, item("sibling")],
    });
    assert_eq!(doc_to_md(vec![list]), "- parent\n  1. child\n- sibling");
}

#[test]
fn test_output_is_whitespace_normalised() {
    let output = doc_to_md(vec![
        para(vec![InlineNode::text("trailing   ")]),
        para(vec![]),
        para(vec![InlineNode::text("next")]),
    ]);
    assert_eq!(output, "trailing\n\nnext");
}
