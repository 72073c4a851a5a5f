//! List parsing
//!
//! Indentation is measured in two-column levels. A list at depth `d` takes
//! sibling items while lines sit at exactly depth `d` and carry a compatible
//! marker (`-`, `*` and `+` mix freely; ordered markers must be numeric). A
//! deeper line belongs to the current item: a nested list, parsed at its own
//! depth, or continuation text. A shallower or mismatched line ends the list.
//! So does a blank line, unless the text after it is indented under the item.
//!
//! Task lines (`- [ ]`, `- [x]`) never continue a bullet list.

use super::inline::parse_inline;
use super::parser::{is_bullet, ORDERED_RE, TASK_RE};
use crate::common::{generate_local_id, indent_level, trim_indent};
use crate::model::{
    BlockNode, BulletList, ListItem, OrderedList, Paragraph, TaskItem, TaskList, TaskState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListKind {
    Bullet,
    Ordered,
}

struct Marker<'a> {
    kind: ListKind,
    number: Option<u32>,
    text: &'a str,
}

/// Reads the list marker at the start of an already left-trimmed line.
fn list_marker(trimmed: &str) -> Option<Marker<'_>> {
    if TASK_RE.is_match(trimmed) {
        return None;
    }
    if is_bullet(trimmed) {
        return Some(Marker {
            kind: ListKind::Bullet,
            number: None,
            text: trimmed.get(2..).unwrap_or("").trim(),
        });
    }
    let caps = ORDERED_RE.captures(trimmed)?;
    Some(Marker {
        kind: ListKind::Ordered,
        number: caps[1].parse().ok(),
        text: caps.get(2).map_or("", |m| m.as_str().trim()),
    })
}

/// Parses a bullet or ordered list whose first item is at `start`, at `depth`.
pub(super) fn parse_list(
    lines: &[&str],
    start: usize,
    depth: usize,
    kind: ListKind,
) -> (Option<BlockNode>, usize) {
    let mut i = start;
    let mut items = Vec::new();
    let mut start_order = 1;

    while i < lines.len() {
        let line = lines[i];
        // A blank line ends the list; the caller skips it.
        if line.trim().is_empty() || indent_level(line) != depth {
            break;
        }
        let Some(marker) = list_marker(line.trim_start()) else {
            break;
        };
        if marker.kind != kind {
            break;
        }
        if items.is_empty() {
            start_order = marker.number.unwrap_or(1);
        }
        let (item, next) = parse_item(lines, i, depth, marker.text);
        items.push(item);
        i = next;
    }

    if items.is_empty() {
        return (None, start + 1);
    }
    let list = match kind {
        ListKind::Bullet => BlockNode::BulletList(BulletList { items }),
        ListKind::Ordered => BlockNode::OrderedList(OrderedList { start_order, items }),
    };
    (Some(list), i)
}

fn parse_item(lines: &[&str], start: usize, depth: usize, text: &str) -> (ListItem, usize) {
    let mut blocks = vec![BlockNode::Paragraph(Paragraph::new(parse_inline(text)))];
    let mut i = start + 1;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            if continues_item(lines, i, depth) {
                i += 1;
                continue;
            }
            break;
        }
        let indent = indent_level(line);
        if indent <= depth {
            break;
        }

        let trimmed = line.trim_start();
        if TASK_RE.is_match(trimmed) {
            let (tasks, next) = parse_task_list(lines, i);
            blocks.push(BlockNode::TaskList(tasks));
            i = next;
        } else if let Some(marker) = list_marker(trimmed) {
            let (nested, next) = parse_list(lines, i, indent, marker.kind);
            blocks.extend(nested);
            i = next;
        } else {
            let (paragraph, next) = parse_continuation(lines, i, depth + 1);
            blocks.push(paragraph);
            i = next;
        }
    }

    (ListItem { blocks }, i)
}

/// Whether the next non-blank line after `blank` still belongs to an item at `depth`.
fn continues_item(lines: &[&str], blank: usize, depth: usize) -> bool {
    lines[blank..]
        .iter()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| indent_level(line) > depth)
}

/// Indented text under an item that is not itself a list line.
fn parse_continuation(lines: &[&str], start: usize, levels: usize) -> (BlockNode, usize) {
    let mut i = start;
    let mut text = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() || indent_level(line) < levels {
            break;
        }
        let trimmed = line.trim_start();
        if !text.is_empty() && (TASK_RE.is_match(trimmed) || list_marker(trimmed).is_some()) {
            break;
        }
        text.push(trim_indent(line, levels));
        i += 1;
    }
    let paragraph = Paragraph::new(parse_inline(&text.join("\n")));
    (BlockNode::Paragraph(paragraph), i.max(start + 1))
}

/// Parses consecutive task lines indented at least as deep as the first one.
pub(super) fn parse_task_list(lines: &[&str], start: usize) -> (TaskList, usize) {
    let base = indent_level(lines[start]);
    let mut i = start;
    let mut items = Vec::new();

    while i < lines.len() && indent_level(lines[i]) >= base {
        let Some(caps) = TASK_RE.captures(lines[i]) else {
            break;
        };
        let state = if caps[2].eq_ignore_ascii_case("x") {
            TaskState::Done
        } else {
            TaskState::Todo
        };
        items.push(TaskItem {
            local_id: generate_local_id(),
            state,
            inline: parse_inline(caps.get(3).map_or("", |m| m.as_str())),
        });
        i += 1;
    }

    let list = TaskList {
        local_id: generate_local_id(),
        items,
    };
    (list, i.max(start + 1))
}
