//! Markdown renderer
//!
//! Walks the tree depth first. Block siblings are separated by a blank line,
//! list items by a single newline with two spaces of indentation per depth.
//! The finished text goes through `normalize_whitespace`.

use crate::common::{format_attrs, format_timestamp, normalize_whitespace, Attrs};
use crate::model::{
    BlockNode, Document, Emoji, Heading, InlineNode, ListItem, Mark, MediaNode, MediaSingle,
    Mention, Paragraph, Status, SubSup, Table, TaskList, TaskState, Text,
};

const INDENT: &str = "  ";

/// Renders a document as extended markdown. Never fails.
pub fn render_markdown(doc: &Document) -> String {
    normalize_whitespace(&render_blocks(&doc.blocks))
}

fn render_blocks(blocks: &[BlockNode]) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, 0))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &BlockNode, depth: usize) -> String {
    match block {
        BlockNode::Paragraph(paragraph) => render_paragraph(paragraph),
        BlockNode::Heading(heading) => render_heading(heading),
        BlockNode::BulletList(list) => render_items(&list.items, depth, |_| "-".to_string()),
        BlockNode::OrderedList(list) => {
            let start = list.start_order as usize;
            render_items(&list.items, depth, |n| format!("{}.", start + n))
        }
        BlockNode::TaskList(tasks) => render_tasks(tasks, depth),
        BlockNode::CodeBlock(code) => format!("```{}\n{}\n```", code.language, code.text),
        BlockNode::Blockquote(quote) => render_blockquote(&render_blocks(&quote.blocks)),
        BlockNode::Rule => "---".to_string(),
        BlockNode::Panel(panel) => format!(
            "~~~panel type={}\n{}\n~~~",
            panel.panel_type,
            render_blocks(&panel.blocks).trim()
        ),
        BlockNode::Expand(expand) => {
            let body = render_blocks(&expand.blocks);
            if expand.title.is_empty() {
                format!("~~~expand\n{}\n~~~", body.trim())
            } else {
                format!("~~~expand title=\"{}\"\n{}\n~~~", expand.title, body.trim())
            }
        }
        BlockNode::Table(table) => render_table(table),
        BlockNode::MediaSingle(single) => render_media_single(single),
        BlockNode::MediaGroup(group) => {
            let images: Vec<String> = group.items.iter().map(render_media).collect();
            format!("~~~mediaGroup\n{}\n~~~", images.join("\n"))
        }
    }
}

fn render_paragraph(paragraph: &Paragraph) -> String {
    let text = render_inline(&paragraph.inline);
    let mut attrs = Attrs::new();
    if let Some(align) = &paragraph.text_align {
        attrs.insert("textAlign".to_string(), align.clone());
    }
    with_metadata("paragraph", &attrs, &["textAlign"], text)
}

fn render_heading(heading: &Heading) -> String {
    let level = heading.level.clamp(1, Heading::MAX_LEVEL) as usize;
    // A heading is a single line.
    let inline = render_inline(&heading.inline)
        .replace("  \n", " ")
        .replace('\n', " ");
    let text = format!("{} {}", "#".repeat(level), inline.trim());
    let mut attrs = Attrs::new();
    if let Some(id) = &heading.id {
        attrs.insert("id".to_string(), id.clone());
    }
    if let Some(align) = &heading.text_align {
        attrs.insert("textAlign".to_string(), align.clone());
    }
    with_metadata("heading", &attrs, &["id", "textAlign"], text)
}

/// Prefixes `text` with a `<!-- adf:kind … -->` line when any attribute is set.
fn with_metadata(kind: &str, attrs: &Attrs, keys: &[&str], text: String) -> String {
    let formatted = format_attrs(attrs, keys);
    if formatted.is_empty() {
        text
    } else {
        format!("<!-- adf:{kind}{formatted} -->\n{text}")
    }
}

fn render_items(items: &[ListItem], depth: usize, marker: impl Fn(usize) -> String) -> String {
    items
        .iter()
        .enumerate()
        .map(|(n, item)| render_item(item, depth, &marker(n)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_item(item: &ListItem, depth: usize, marker: &str) -> String {
    let child_indent = INDENT.repeat(depth + 1);
    let mut blocks = item.blocks.iter().peekable();

    let head = match blocks.peek() {
        Some(BlockNode::Paragraph(paragraph)) => {
            blocks.next();
            indent_tail(&render_inline(&paragraph.inline), &child_indent)
        }
        _ => String::new(),
    };
    let mut out = format!("{}{marker} {head}", INDENT.repeat(depth));

    let mut previous_was_text = false;
    for block in blocks {
        match block {
            BlockNode::BulletList(_) | BlockNode::OrderedList(_) | BlockNode::TaskList(_) => {
                out.push('\n');
                out.push_str(&render_block(block, depth + 1));
                previous_was_text = false;
            }
            BlockNode::Paragraph(paragraph) => {
                out.push_str(if previous_was_text { "\n\n" } else { "\n" });
                out.push_str(&indent_all(&render_inline(&paragraph.inline), &child_indent));
                previous_was_text = true;
            }
            other => {
                out.push('\n');
                out.push_str(&indent_all(&render_block(other, 0), &child_indent));
                previous_was_text = false;
            }
        }
    }
    out
}

fn render_tasks(tasks: &TaskList, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    tasks
        .items
        .iter()
        .map(|task| {
            let checkbox = match task.state {
                TaskState::Done => "[x]",
                TaskState::Todo => "[ ]",
            };
            format!("{indent}- {checkbox} {}", render_inline(&task.inline))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indents every line after the first.
fn indent_tail(text: &str, indent: &str) -> String {
    text.replace('\n', &format!("\n{indent}"))
}

fn indent_all(text: &str, indent: &str) -> String {
    format!("{indent}{}", indent_tail(text, indent))
}

fn render_blockquote(body: &str) -> String {
    body.trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(table: &Table) -> String {
    if table.rows.is_empty() {
        return String::new();
    }
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| render_cell(&cell.blocks)).collect())
        .collect();
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }
    let header = table
        .rows
        .iter()
        .position(|row| row.cells.iter().any(|cell| cell.is_header))
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (n, mut cells) in rows.into_iter().enumerate() {
        cells.resize(columns, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
        if n == header {
            lines.push(format!("| {} |", vec!["---"; columns].join(" | ")));
        }
    }
    lines.join("\n")
}

fn render_cell(blocks: &[BlockNode]) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, 0))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .replace('\n', " ")
        .replace('|', "\\|")
}

fn render_media_single(single: &MediaSingle) -> String {
    let layout = match single.layout.as_str() {
        "" => MediaSingle::DEFAULT_LAYOUT,
        layout => layout,
    };
    let mut attrs = format!(" layout={layout}");
    // Widths that round to zero would be dropped on the way back in.
    let width = single
        .width
        .map(f64::round)
        .filter(|w| w.is_finite() && *w >= 1.0);
    if let Some(width) = width {
        let width_type = single
            .width_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(MediaSingle::DEFAULT_WIDTH_TYPE);
        attrs.push_str(&format!(" width={width:.0} widthType={width_type}"));
    }
    format!("~~~mediaSingle{attrs}\n{}\n~~~", render_media(&single.media))
}

fn render_media(media: &MediaNode) -> String {
    let alt = if media.alt.is_empty() {
        "attachment"
    } else {
        media.alt.as_str()
    };
    if let Some(source) = &media.pending_source {
        return format!("![{alt}]({source})");
    }
    match media.reference() {
        Some(reference) => format!("![{alt}]({reference})"),
        None => format!("[{alt}]"),
    }
}

/// Renders inline nodes back to back.
pub fn render_inline(nodes: &[InlineNode]) -> String {
    nodes.iter().map(render_inline_node).collect()
}

fn render_inline_node(node: &InlineNode) -> String {
    match node {
        InlineNode::Text(text) => apply_marks(text),
        InlineNode::HardBreak => "  \n".to_string(),
        InlineNode::Emoji(emoji) => render_emoji(emoji),
        InlineNode::Mention(mention) => render_mention(mention),
        InlineNode::Status(status) => render_status(status),
        InlineNode::Date(date) if date.timestamp.is_empty() => String::new(),
        InlineNode::Date(date) => format!("{{date:{}}}", format_timestamp(&date.timestamp)),
        InlineNode::InlineCard(card) => format!("{{card:{}}}", card.url),
    }
}

fn render_emoji(emoji: &Emoji) -> String {
    match (emoji.short_name.as_deref(), emoji.text.as_deref()) {
        (Some(name), _) if !name.is_empty() => {
            if name.len() > 1 && name.starts_with(':') && name.ends_with(':') {
                name.to_string()
            } else {
                format!(":{}:", name.trim_matches(':'))
            }
        }
        (_, Some(text)) => text.to_string(),
        _ => String::new(),
    }
}

fn render_mention(mention: &Mention) -> String {
    let display = mention
        .display_text
        .strip_prefix('@')
        .unwrap_or(&mention.display_text);
    let display = if display.is_empty() {
        mention.id.as_str()
    } else {
        display
    };

    if !mention.id.is_empty() {
        format!("@[{display}](accountId:{})", mention.id)
    } else if !mention.display_text.is_empty() {
        mention.display_text.clone()
    } else {
        "@unknown".to_string()
    }
}

fn render_status(status: &Status) -> String {
    if status.text.is_empty() {
        return String::new();
    }
    match status.color.as_deref().filter(|c| !c.is_empty()) {
        Some(color) => format!("{{status:{}|color={color}}}", status.text),
        None => format!("{{status:{}}}", status.text),
    }
}

/// Wraps text in its marks, innermost first: code, link, em, strong, strike,
/// underline, text colour, background colour, sub/sup.
fn apply_marks(text: &Text) -> String {
    if text.text.is_empty() {
        return String::new();
    }
    let mut out = text.text.clone();

    if text.has_mark(&Mark::Code) {
        out = format!("`{out}`");
    }
    for mark in &text.marks {
        if let Mark::Link { href, title } = mark {
            out = match title.as_deref().filter(|t| !t.is_empty()) {
                Some(title) => format!("[{out}]({href} \"{title}\")"),
                None => format!("[{out}]({href})"),
            };
            break;
        }
    }
    if text.has_mark(&Mark::Em) {
        out = format!("*{out}*");
    }
    if text.has_mark(&Mark::Strong) {
        out = format!("**{out}**");
    }
    if text.has_mark(&Mark::Strike) {
        out = format!("~~{out}~~");
    }
    if text.has_mark(&Mark::Underline) {
        out = format!("<u>{out}</u>");
    }
    for mark in &text.marks {
        if let Mark::TextColor { color } = mark {
            if !color.is_empty() {
                out = format!("{{color:{color}}}{out}{{color}}");
            }
            break;
        }
    }
    for mark in &text.marks {
        if let Mark::BackgroundColor { color } = mark {
            if !color.is_empty() {
                out = format!("<mark style=\"background:{color}\">{out}</mark>");
            }
            break;
        }
    }
    for mark in &text.marks {
        if let Mark::Subsup { kind } = mark {
            out = match kind {
                SubSup::Sub => format!("<sub>{out}</sub>"),
                SubSup::Sup => format!("<sup>{out}</sup>"),
            };
            break;
        }
    }
    out
}
