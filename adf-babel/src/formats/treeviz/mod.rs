//! Treeviz formatter for documents
//!
//! Treeviz is a visual representation of the document tree, one node per line.
//! It encodes the node structure as indentation, with 2 columns per level of nesting.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//!   ⧉ Document (3 blocks)
//!   ├─ § h1 Release notes
//!   ├─ ☰ 2 items
//!   │ ├─ • First
//!   │ │ └─ ¶ First
//!   │ └─ • Second
//!   │   └─ ¶ Second
//!   └─ ▣ warning
//!     └─ ¶ Mind the gap
//!
//! With `include-inline=true` the inline nodes of paragraphs, headings and task
//! items are listed as their children.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{
    BlockNode, Document, InlineNode, ListItem, Mark, MediaNode, TableCell, TaskItem, TaskState,
};
use std::collections::HashMap;

const MAX_LABEL: usize = 30;

/// One line of the tree with its children.
struct Entry {
    kind: &'static str,
    label: String,
    children: Vec<Entry>,
}

impl Entry {
    fn leaf(kind: &'static str, label: impl Into<String>) -> Self {
        Entry {
            kind,
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn with_children(kind: &'static str, label: impl Into<String>, children: Vec<Entry>) -> Self {
        Entry {
            kind,
            label: label.into(),
            children,
        }
    }
}

fn truncate(label: &str) -> String {
    let label = label.replace('\n', " ");
    if label.chars().count() > MAX_LABEL {
        let mut short: String = label.chars().take(MAX_LABEL).collect();
        short.push('…');
        short
    } else {
        label
    }
}

/// Plain text of an inline sequence.
fn inline_text(nodes: &[InlineNode]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            InlineNode::Text(text) => text.text.clone(),
            InlineNode::HardBreak => " ".to_string(),
            InlineNode::Emoji(emoji) => emoji
                .text
                .clone()
                .or_else(|| emoji.short_name.clone())
                .unwrap_or_default(),
            InlineNode::Mention(mention) => mention.display_text.clone(),
            InlineNode::Status(status) => status.text.clone(),
            InlineNode::Date(date) => date.timestamp.clone(),
            InlineNode::InlineCard(card) => card.url.clone(),
        })
        .collect()
}

fn inline_entry(node: &InlineNode) -> Entry {
    let label = match node {
        InlineNode::Text(text) if text.marks.is_empty() => text.text.clone(),
        InlineNode::Text(text) => {
            let marks: Vec<&str> = text.marks.iter().map(mark_name).collect();
            format!("{} [{}]", text.text, marks.join(", "))
        }
        InlineNode::HardBreak => String::new(),
        InlineNode::Status(status) => match &status.color {
            Some(color) => format!("{} ({color})", status.text),
            None => status.text.clone(),
        },
        other => inline_text(std::slice::from_ref(other)),
    };
    Entry::leaf(node.kind(), label)
}

fn mark_name(mark: &Mark) -> &'static str {
    match mark {
        Mark::Strong => "strong",
        Mark::Em => "em",
        Mark::Code => "code",
        Mark::Strike => "strike",
        Mark::Underline => "underline",
        Mark::Link { .. } => "link",
        Mark::TextColor { .. } => "textColor",
        Mark::BackgroundColor { .. } => "backgroundColor",
        Mark::Subsup { .. } => "subsup",
    }
}

fn inline_children(nodes: &[InlineNode], include_inline: bool) -> Vec<Entry> {
    if include_inline {
        nodes.iter().map(inline_entry).collect()
    } else {
        Vec::new()
    }
}

fn media_entry(media: &MediaNode) -> Entry {
    let label = match (&media.pending_source, media.reference()) {
        (Some(source), _) => format!("pending {source}"),
        (None, Some(reference)) => reference,
        (None, None) => media.alt.clone(),
    };
    Entry::leaf("Media", label)
}

fn block_entries(blocks: &[BlockNode], include_inline: bool) -> Vec<Entry> {
    blocks
        .iter()
        .map(|block| block_entry(block, include_inline))
        .collect()
}

fn item_entries(items: &[ListItem], include_inline: bool) -> Vec<Entry> {
    items
        .iter()
        .map(|item| {
            let label = match item.blocks.first() {
                Some(BlockNode::Paragraph(paragraph)) => inline_text(&paragraph.inline),
                _ => String::new(),
            };
            Entry::with_children(
                "ListItem",
                label,
                block_entries(&item.blocks, include_inline),
            )
        })
        .collect()
}

fn task_entry(task: &TaskItem, include_inline: bool) -> Entry {
    let check = match task.state {
        TaskState::Done => "x",
        TaskState::Todo => " ",
    };
    Entry::with_children(
        "TaskItem",
        format!("[{check}] {}", inline_text(&task.inline)),
        inline_children(&task.inline, include_inline),
    )
}

fn cell_entry(cell: &TableCell, include_inline: bool) -> Entry {
    let kind = if cell.is_header {
        "TableHeader"
    } else {
        "TableCell"
    };
    let label = match cell.blocks.first() {
        Some(BlockNode::Paragraph(paragraph)) => inline_text(&paragraph.inline),
        _ => String::new(),
    };
    Entry::with_children(kind, label, block_entries(&cell.blocks, include_inline))
}

fn block_entry(block: &BlockNode, include_inline: bool) -> Entry {
    let kind = block.kind();
    match block {
        BlockNode::Paragraph(paragraph) => Entry::with_children(
            kind,
            inline_text(&paragraph.inline),
            inline_children(&paragraph.inline, include_inline),
        ),
        BlockNode::Heading(heading) => Entry::with_children(
            kind,
            format!("h{} {}", heading.level, inline_text(&heading.inline)),
            inline_children(&heading.inline, include_inline),
        ),
        BlockNode::BulletList(list) => Entry::with_children(
            kind,
            format!("{} items", list.items.len()),
            item_entries(&list.items, include_inline),
        ),
        BlockNode::OrderedList(list) => Entry::with_children(
            kind,
            format!("{} items from {}", list.items.len(), list.start_order),
            item_entries(&list.items, include_inline),
        ),
        BlockNode::TaskList(tasks) => Entry::with_children(
            kind,
            format!("{} tasks", tasks.items.len()),
            tasks
                .items
                .iter()
                .map(|task| task_entry(task, include_inline))
                .collect(),
        ),
        BlockNode::CodeBlock(code) => {
            let language = if code.language.is_empty() {
                "text"
            } else {
                code.language.as_str()
            };
            Entry::leaf(kind, format!("{language}: {}", code.text))
        }
        BlockNode::Blockquote(quote) => Entry::with_children(
            kind,
            format!("{} blocks", quote.blocks.len()),
            block_entries(&quote.blocks, include_inline),
        ),
        BlockNode::Rule => Entry::leaf(kind, "---"),
        BlockNode::Panel(panel) => Entry::with_children(
            kind,
            panel.panel_type.as_str(),
            block_entries(&panel.blocks, include_inline),
        ),
        BlockNode::Expand(expand) => Entry::with_children(
            kind,
            expand.title.as_str(),
            block_entries(&expand.blocks, include_inline),
        ),
        BlockNode::Table(table) => {
            let columns = table.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);
            let rows = table
                .rows
                .iter()
                .map(|row| {
                    Entry::with_children(
                        "TableRow",
                        format!("{} cells", row.cells.len()),
                        row.cells
                            .iter()
                            .map(|cell| cell_entry(cell, include_inline))
                            .collect(),
                    )
                })
                .collect();
            Entry::with_children(kind, format!("{}x{columns}", table.rows.len()), rows)
        }
        BlockNode::MediaSingle(single) => Entry::with_children(
            kind,
            single.layout.as_str(),
            vec![media_entry(&single.media)],
        ),
        BlockNode::MediaGroup(group) => Entry::with_children(
            kind,
            format!("{} items", group.items.len()),
            group.items.iter().map(media_entry).collect(),
        ),
    }
}

fn format_entry(entry: &Entry, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(entry.kind),
        truncate(&entry.label)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(&entry.children, &child_prefix, output);
}

fn format_children(children: &[Entry], prefix: &str, output: &mut String) {
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_entry(child, prefix, i == child_count - 1, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"include-inline"`: When set to `"true"`, lists the inline nodes of
///   paragraphs, headings and task items (with their marks) as children.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let include_inline = params
        .get("include-inline")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let icon = get_icon("Document");
    let mut output = format!("{} Document ({} blocks)\n", icon, doc.blocks.len());
    format_children(&block_entries(&doc.blocks, include_inline), "", &mut output);
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options.keys().find(|key| key.as_str() != "include-inline") {
            return Err(FormatError::NotSupported(format!(
                "Format 'treeviz' does not support parameter '{key}'"
            )));
        }
        Ok(to_treeviz_str_with_params(doc, options))
    }
}
