//! Markdown parser
//!
//! A single forward pass over lines. At each position the first matching
//! block predicate, in the priority order of [`BlockStart`], picks the handler.
//! Handlers return the node they built and the index of the first line they did
//! not consume, so the cursor always moves forward.
//!
//! Nothing here fails: unknown fences become code blocks and any line no
//! predicate claims is paragraph text.

use super::inline::parse_inline;
use super::lists::{parse_list, parse_task_list, ListKind};
use crate::common::{parse_attrs, Attrs};
use crate::model::{
    Blockquote, BlockNode, CodeBlock, Document, Expand, Heading, MediaGroup, MediaNode,
    MediaSingle, Panel, Paragraph, Table, TableCell, TableRow,
};
use once_cell::sync::Lazy;
use regex::Regex;

static METADATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<!--\s*adf:(\w+)\s+(.+?)\s*-->$").unwrap());
static FENCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~~(\w+)(?:\s+(.*))?$").unwrap());
static FENCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~~\s*$").unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+) (.*)$").unwrap());
pub(super) static TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)- \[([ xX])\](?:\s+(.*))?$").unwrap());
pub(super) static ORDERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(?:\s+(.*))?$").unwrap());
static STANDALONE_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static SEPARATOR_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// What a line starts, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockStart {
    Blank,
    Metadata,
    CustomFence,
    CodeFence,
    Heading,
    Rule,
    Blockquote,
    Table,
    TaskList,
    BulletList,
    OrderedList,
    Image,
    Paragraph,
}

fn classify(line: &str) -> BlockStart {
    if line.trim().is_empty() {
        BlockStart::Blank
    } else if METADATA_RE.is_match(line.trim()) {
        BlockStart::Metadata
    } else if FENCE_OPEN_RE.is_match(line) {
        BlockStart::CustomFence
    } else if line.starts_with("```") {
        BlockStart::CodeFence
    } else if HEADING_RE.is_match(line) {
        BlockStart::Heading
    } else if matches!(line, "---" | "***" | "___") {
        BlockStart::Rule
    } else if line.starts_with("> ") || line == ">" {
        BlockStart::Blockquote
    } else if line.starts_with('|') {
        BlockStart::Table
    } else if TASK_RE.is_match(line) {
        BlockStart::TaskList
    } else if is_bullet(line) {
        BlockStart::BulletList
    } else if ORDERED_RE.is_match(line) {
        BlockStart::OrderedList
    } else if STANDALONE_IMAGE_RE.is_match(line.trim()) {
        BlockStart::Image
    } else {
        BlockStart::Paragraph
    }
}

/// A bullet marker followed by a space, or a bare marker (an empty item).
pub(super) fn is_bullet(text: &str) -> bool {
    matches!(text, "-" | "*" | "+")
        || text.starts_with("- ")
        || text.starts_with("* ")
        || text.starts_with("+ ")
}

/// Parses extended markdown into a document.
pub fn parse_markdown(source: &str) -> Document {
    let lines = split_lines(source);
    let doc = Document::new(parse_blocks(&lines));
    tracing::debug!(blocks = doc.blocks.len(), "parsed markdown");
    doc
}

fn split_lines(source: &str) -> Vec<&str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Parses a run of lines into blocks. Fence and quote bodies recurse through here.
pub(super) fn parse_blocks(lines: &[&str]) -> Vec<BlockNode> {
    let mut blocks = Vec::new();
    let mut metadata: Option<Attrs> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let start = classify(line);
        tracing::trace!(line = i, ?start, "block dispatch");

        let (node, next) = match start {
            BlockStart::Blank => {
                i += 1;
                continue;
            }
            BlockStart::Metadata => {
                metadata = METADATA_RE
                    .captures(line.trim())
                    .map(|caps| parse_attrs(&caps[2]));
                i += 1;
                continue;
            }
            BlockStart::CustomFence => parse_custom_fence(lines, i),
            BlockStart::CodeFence => parse_code_fence(lines, i),
            BlockStart::Heading => (parse_heading(line, metadata.as_ref()), i + 1),
            BlockStart::Rule => (Some(BlockNode::Rule), i + 1),
            BlockStart::Blockquote => parse_blockquote(lines, i),
            BlockStart::Table => parse_table(lines, i),
            BlockStart::TaskList => {
                let (list, next) = parse_task_list(lines, i);
                (Some(BlockNode::TaskList(list)), next)
            }
            BlockStart::BulletList => parse_list(lines, i, 0, ListKind::Bullet),
            BlockStart::OrderedList => parse_list(lines, i, 0, ListKind::Ordered),
            BlockStart::Image => (parse_standalone_image(line), i + 1),
            BlockStart::Paragraph => parse_paragraph(lines, i, metadata.as_ref()),
        };

        blocks.extend(node);
        metadata = None;
        // Every handler consumes its first line; guard the cursor regardless.
        i = next.max(i + 1);
    }

    blocks
}

fn parse_custom_fence(lines: &[&str], start: usize) -> (Option<BlockNode>, usize) {
    let Some(caps) = FENCE_OPEN_RE.captures(lines[start]) else {
        return (None, start + 1);
    };
    let name = caps[1].to_string();
    let attrs = parse_attrs(caps.get(2).map_or("", |m| m.as_str()));

    let mut i = start + 1;
    let mut body = Vec::new();
    let mut closed = false;
    while i < lines.len() {
        if FENCE_CLOSE_RE.is_match(lines[i]) {
            i += 1;
            closed = true;
            break;
        }
        body.push(lines[i]);
        i += 1;
    }
    if !closed {
        tracing::debug!(fence = %name, "unterminated fence runs to end of input");
    }

    let node = match name.as_str() {
        "panel" => BlockNode::Panel(Panel {
            panel_type: attrs
                .get("type")
                .filter(|t| !t.is_empty())
                .cloned()
                .unwrap_or_else(|| Panel::DEFAULT_TYPE.to_string()),
            blocks: parse_blocks(&body),
        }),
        "expand" => BlockNode::Expand(Expand {
            title: attrs.get("title").cloned().unwrap_or_default(),
            blocks: parse_blocks(&body),
        }),
        "mediaSingle" => BlockNode::MediaSingle(parse_media_single(&attrs, &body.join("\n"))),
        "mediaGroup" => BlockNode::MediaGroup(MediaGroup {
            items: IMAGE_RE
                .captures_iter(&body.join("\n"))
                .map(|caps| MediaNode::from_source(&caps[2], &caps[1]))
                .collect(),
        }),
        _ => {
            tracing::debug!(fence = %name, "unknown fence, keeping it as a code block");
            BlockNode::CodeBlock(CodeBlock {
                language: name,
                text: body.join("\n"),
            })
        }
    };
    (Some(node), i)
}

fn parse_media_single(attrs: &Attrs, body: &str) -> MediaSingle {
    let media = IMAGE_RE
        .captures(body)
        .map(|caps| MediaNode::from_source(&caps[2], &caps[1]))
        .unwrap_or_else(|| MediaNode {
            media_type: "file".to_string(),
            ..MediaNode::default()
        });

    let mut single = MediaSingle::new(media);
    if let Some(layout) = attrs.get("layout").filter(|l| !l.is_empty()) {
        single.layout = layout.clone();
    }
    let width = attrs
        .get("width")
        .and_then(|w| w.parse::<f64>().ok())
        .filter(|w| *w > 0.0);
    if let Some(width) = width {
        single.width = Some(width);
        single.width_type = Some(
            attrs
                .get("widthType")
                .filter(|t| !t.is_empty())
                .cloned()
                .unwrap_or_else(|| MediaSingle::DEFAULT_WIDTH_TYPE.to_string()),
        );
    }
    single
}

fn parse_code_fence(lines: &[&str], start: usize) -> (Option<BlockNode>, usize) {
    let line = lines[start];
    let language = line.strip_prefix("```").unwrap_or(line).trim().to_string();
    let mut i = start + 1;
    let mut body = Vec::new();
    while i < lines.len() && !lines[i].starts_with("```") {
        body.push(lines[i]);
        i += 1;
    }
    let block = BlockNode::CodeBlock(CodeBlock {
        language,
        text: body.join("\n"),
    });
    (Some(block), i + 1)
}

fn parse_heading(line: &str, metadata: Option<&Attrs>) -> Option<BlockNode> {
    let caps = HEADING_RE.captures(line)?;
    let mut heading = Heading::new(caps[1].len(), parse_inline(caps[2].trim()));
    if let Some(attrs) = metadata {
        heading.id = attrs.get("id").cloned();
        heading.text_align = attrs.get("textAlign").cloned();
    }
    Some(BlockNode::Heading(heading))
}

fn parse_blockquote(lines: &[&str], start: usize) -> (Option<BlockNode>, usize) {
    let mut i = start;
    let mut body = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        if let Some(rest) = line.strip_prefix("> ") {
            body.push(rest);
        } else if line == ">" {
            body.push("");
        } else {
            break;
        }
        i += 1;
    }
    let quote = Blockquote {
        blocks: parse_blocks(&body),
    };
    (Some(BlockNode::Blockquote(quote)), i)
}

fn parse_table(lines: &[&str], start: usize) -> (Option<BlockNode>, usize) {
    let mut i = start;
    let mut rows = Vec::new();
    while i < lines.len() && lines[i].starts_with('|') {
        let cells = split_table_row(lines[i].trim());
        i += 1;
        if is_separator_row(&cells) {
            continue;
        }
        let is_header = rows.is_empty();
        rows.push(TableRow {
            cells: cells
                .iter()
                .map(|cell| TableCell {
                    is_header,
                    blocks: vec![BlockNode::Paragraph(Paragraph::new(parse_inline(cell)))],
                })
                .collect(),
        });
    }

    if rows.is_empty() {
        return (None, i);
    }
    (Some(BlockNode::Table(Table { rows })), i)
}

/// Splits a row on unescaped pipes; `\|` becomes a literal pipe in the cell.
pub(crate) fn split_table_row(row: &str) -> Vec<String> {
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = match row.strip_suffix('|') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => row,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = row.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| SEPARATOR_CELL_RE.is_match(cell))
}

fn parse_standalone_image(line: &str) -> Option<BlockNode> {
    let caps = STANDALONE_IMAGE_RE.captures(line.trim())?;
    let media = MediaNode::from_source(&caps[2], &caps[1]);
    Some(BlockNode::MediaSingle(MediaSingle::new(media)))
}

fn parse_paragraph(
    lines: &[&str],
    start: usize,
    metadata: Option<&Attrs>,
) -> (Option<BlockNode>, usize) {
    let mut i = start;
    let mut text_lines: Vec<&str> = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            break;
        }
        if !text_lines.is_empty() && classify(line) != BlockStart::Paragraph {
            break;
        }
        text_lines.push(line);
        i += 1;
    }

    if text_lines.is_empty() {
        return (None, i);
    }
    let mut paragraph = Paragraph::new(parse_inline(&text_lines.join("\n")));
    paragraph.text_align = metadata.and_then(|attrs| attrs.get("textAlign").cloned());
    (Some(BlockNode::Paragraph(paragraph)), i)
}
