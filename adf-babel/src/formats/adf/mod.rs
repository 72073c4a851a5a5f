//! ADF wire JSON format
//!
//! Maps the typed model to the host platform's JSON document shape
//! (`{"type": "doc", "version": 1, "content": [...]}`) and back.
//!
//! Writing is strict about one thing: a pending media placeholder must not reach
//! the host, so serialising a document that still holds one fails with
//! [`FormatError::PendingMedia`]. The `allow-pending-media` option writes the
//! placeholder in its internal form instead (`__PENDING_UPLOAD_…__` id plus a
//! `_source` attribute), which reading turns back into a pending node.
//!
//! Reading is permissive. Only a root that is not a `doc` object is an error;
//! unknown nodes and marks are skipped, missing attributes take defaults.
//!
//! # Parameters
//!
//! - `pretty` (default `true`): indent the output
//! - `allow-pending-media` (default `false`): see above

use crate::common::generate_local_id;
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{
    Blockquote, BlockNode, BulletList, CodeBlock, DateStamp, Document, Emoji, Expand, Heading,
    InlineCard, InlineNode, ListItem, Mark, MediaGroup, MediaNode, MediaSingle, Mention,
    OrderedList, Panel, Paragraph, Status, SubSup, Table, TableCell, TableRow, TaskItem,
    TaskList, TaskState, Text,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

const SOURCE_ATTR: &str = "_source";

/// Options for writing wire JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdfOptions {
    pub pretty: bool,
    pub allow_pending_media: bool,
}

impl Default for AdfOptions {
    fn default() -> Self {
        AdfOptions {
            pretty: true,
            allow_pending_media: false,
        }
    }
}

impl AdfOptions {
    /// Reads `pretty` and `allow-pending-media`; any other key is rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = Self::default();
        for (key, value) in params {
            match key.as_str() {
                "pretty" => options.pretty = parse_flag(key, value)?,
                "allow-pending-media" => options.allow_pending_media = parse_flag(key, value)?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'adf' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(FormatError::NotSupported(format!(
            "Parameter '{key}' expects true or false, got '{value}'"
        ))),
    }
}

/// Format implementation for ADF wire JSON
#[derive(Default)]
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        from_str(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_string(doc, &AdfOptions::default())
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = AdfOptions::from_params(options)?;
        to_string(doc, &options)
    }
}

pub fn to_string(doc: &Document, options: &AdfOptions) -> Result<String, FormatError> {
    let value = to_value(doc, options)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn from_str(source: &str) -> Result<Document, FormatError> {
    let value: Value =
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
    from_value(&value)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Converts a document to its wire JSON value.
pub fn to_value(doc: &Document, options: &AdfOptions) -> Result<Value, FormatError> {
    let writer = Writer {
        allow_pending_media: options.allow_pending_media,
    };
    Ok(json!({
        "type": "doc",
        "version": doc.version,
        "content": writer.blocks(&doc.blocks)?,
    }))
}

struct Writer {
    allow_pending_media: bool,
}

impl Writer {
    fn blocks(&self, blocks: &[BlockNode]) -> Result<Vec<Value>, FormatError> {
        blocks.iter().map(|block| self.block(block)).collect()
    }

    fn block(&self, block: &BlockNode) -> Result<Value, FormatError> {
        let value = match block {
            BlockNode::Paragraph(paragraph) => {
                let mut node = json!({"type": "paragraph", "content": inlines(&paragraph.inline)});
                if let Some(align) = &paragraph.text_align {
                    node["attrs"] = json!({ "textAlign": align });
                }
                node
            }
            BlockNode::Heading(heading) => {
                let mut attrs = Map::new();
                attrs.insert("level".into(), heading.level.into());
                if let Some(id) = &heading.id {
                    attrs.insert("id".into(), id.as_str().into());
                }
                if let Some(align) = &heading.text_align {
                    attrs.insert("textAlign".into(), align.as_str().into());
                }
                json!({"type": "heading", "attrs": attrs, "content": inlines(&heading.inline)})
            }
            BlockNode::BulletList(list) => {
                json!({"type": "bulletList", "content": self.items(&list.items)?})
            }
            BlockNode::OrderedList(list) => {
                let mut node = json!({"type": "orderedList", "content": self.items(&list.items)?});
                if list.start_order != 1 {
                    node["attrs"] = json!({ "order": list.start_order });
                }
                node
            }
            BlockNode::TaskList(tasks) => {
                let items: Vec<Value> = tasks
                    .items
                    .iter()
                    .map(|task| {
                        json!({
                            "type": "taskItem",
                            "attrs": {"localId": task.local_id, "state": task.state.as_str()},
                            "content": inlines(&task.inline),
                        })
                    })
                    .collect();
                json!({"type": "taskList", "attrs": {"localId": tasks.local_id}, "content": items})
            }
            BlockNode::CodeBlock(code) => {
                let mut node = json!({"type": "codeBlock", "content": []});
                if !code.language.is_empty() {
                    node["attrs"] = json!({ "language": code.language });
                }
                if !code.text.is_empty() {
                    node["content"] = json!([{"type": "text", "text": code.text}]);
                }
                node
            }
            BlockNode::Blockquote(quote) => {
                json!({"type": "blockquote", "content": self.blocks(&quote.blocks)?})
            }
            BlockNode::Rule => json!({"type": "rule"}),
            BlockNode::Panel(panel) => json!({
                "type": "panel",
                "attrs": {"panelType": panel.panel_type},
                "content": self.blocks(&panel.blocks)?,
            }),
            BlockNode::Expand(expand) => json!({
                "type": "expand",
                "attrs": {"title": expand.title},
                "content": self.blocks(&expand.blocks)?,
            }),
            BlockNode::Table(table) => {
                let rows = table
                    .rows
                    .iter()
                    .map(|row| self.row(row))
                    .collect::<Result<Vec<_>, _>>()?;
                json!({
                    "type": "table",
                    "attrs": {"isNumberColumnEnabled": false, "layout": "default"},
                    "content": rows,
                })
            }
            BlockNode::MediaSingle(single) => {
                let mut attrs = Map::new();
                attrs.insert("layout".into(), single.layout.as_str().into());
                if let Some(width) = single.width {
                    attrs.insert("width".into(), json!(width));
                }
                if let Some(width_type) = &single.width_type {
                    attrs.insert("widthType".into(), width_type.as_str().into());
                }
                json!({"type": "mediaSingle", "attrs": attrs, "content": [self.media(&single.media)?]})
            }
            BlockNode::MediaGroup(group) => {
                let items = group
                    .items
                    .iter()
                    .map(|media| self.media(media))
                    .collect::<Result<Vec<_>, _>>()?;
                json!({"type": "mediaGroup", "content": items})
            }
        };
        Ok(value)
    }

    fn items(&self, items: &[ListItem]) -> Result<Vec<Value>, FormatError> {
        items
            .iter()
            .map(|item| Ok(json!({"type": "listItem", "content": self.blocks(&item.blocks)?})))
            .collect()
    }

    fn row(&self, row: &TableRow) -> Result<Value, FormatError> {
        let cells = row
            .cells
            .iter()
            .map(|cell| {
                let kind = if cell.is_header {
                    "tableHeader"
                } else {
                    "tableCell"
                };
                Ok(json!({"type": kind, "attrs": {}, "content": self.blocks(&cell.blocks)?}))
            })
            .collect::<Result<Vec<_>, FormatError>>()?;
        Ok(json!({"type": "tableRow", "content": cells}))
    }

    fn media(&self, media: &MediaNode) -> Result<Value, FormatError> {
        if let Some(source) = &media.pending_source {
            if !self.allow_pending_media {
                return Err(FormatError::PendingMedia(source.clone()));
            }
        }
        let mut attrs = Map::new();
        attrs.insert("id".into(), media.id.as_str().into());
        attrs.insert("type".into(), media.media_type.as_str().into());
        if let Some(collection) = &media.collection {
            attrs.insert("collection".into(), collection.as_str().into());
        }
        if !media.alt.is_empty() {
            attrs.insert("alt".into(), media.alt.as_str().into());
        }
        if let Some(source) = &media.pending_source {
            attrs.insert(SOURCE_ATTR.into(), source.as_str().into());
        }
        Ok(json!({"type": "media", "attrs": attrs}))
    }
}

fn inlines(nodes: &[InlineNode]) -> Vec<Value> {
    nodes.iter().filter_map(inline).collect()
}

fn inline(node: &InlineNode) -> Option<Value> {
    let value = match node {
        InlineNode::Text(text) if text.text.is_empty() => return None,
        InlineNode::Text(text) => {
            let mut value = json!({"type": "text", "text": text.text});
            if !text.marks.is_empty() {
                value["marks"] = text.marks.iter().map(mark).collect();
            }
            value
        }
        InlineNode::HardBreak => json!({"type": "hardBreak"}),
        InlineNode::Emoji(emoji) => {
            let mut attrs = Map::new();
            if let Some(short_name) = &emoji.short_name {
                attrs.insert("shortName".into(), short_name.as_str().into());
            }
            if let Some(text) = &emoji.text {
                attrs.insert("text".into(), text.as_str().into());
            }
            json!({"type": "emoji", "attrs": attrs})
        }
        InlineNode::Mention(mention) => json!({
            "type": "mention",
            "attrs": {"id": mention.id, "text": mention.display_text},
        }),
        InlineNode::Status(status) => {
            let mut attrs = Map::new();
            attrs.insert("text".into(), status.text.as_str().into());
            if let Some(color) = &status.color {
                attrs.insert("color".into(), color.as_str().into());
            }
            attrs.insert("localId".into(), status.local_id.as_str().into());
            json!({"type": "status", "attrs": attrs})
        }
        InlineNode::Date(date) => json!({"type": "date", "attrs": {"timestamp": date.timestamp}}),
        InlineNode::InlineCard(card) => json!({"type": "inlineCard", "attrs": {"url": card.url}}),
    };
    Some(value)
}

fn mark(mark: &Mark) -> Value {
    match mark {
        Mark::Strong => json!({"type": "strong"}),
        Mark::Em => json!({"type": "em"}),
        Mark::Code => json!({"type": "code"}),
        Mark::Strike => json!({"type": "strike"}),
        Mark::Underline => json!({"type": "underline"}),
        Mark::Link { href, title } => {
            let mut attrs = Map::new();
            attrs.insert("href".into(), href.as_str().into());
            if let Some(title) = title {
                attrs.insert("title".into(), title.as_str().into());
            }
            json!({"type": "link", "attrs": attrs})
        }
        Mark::TextColor { color } => json!({"type": "textColor", "attrs": {"color": color}}),
        Mark::BackgroundColor { color } => {
            json!({"type": "backgroundColor", "attrs": {"color": color}})
        }
        Mark::Subsup { kind } => json!({"type": "subsup", "attrs": {"type": kind.as_str()}}),
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Builds a document from a wire JSON value.
pub fn from_value(value: &Value) -> Result<Document, FormatError> {
    let Some(root) = value.as_object() else {
        return Err(FormatError::ParseError(
            "ADF root must be a JSON object".to_string(),
        ));
    };
    match root.get("type").and_then(Value::as_str) {
        Some("doc") => {}
        Some(other) => {
            return Err(FormatError::ParseError(format!(
                "ADF root must have type 'doc', found '{other}'"
            )))
        }
        None => {
            return Err(FormatError::ParseError(
                "ADF root has no type".to_string(),
            ))
        }
    }
    Ok(Document::new(read_blocks(children(value))))
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

fn attr<'v>(node: &'v Value, key: &str) -> Option<&'v Value> {
    node.get("attrs")?.get(key)
}

fn attr_str(node: &Value, key: &str) -> Option<String> {
    attr(node, key).and_then(Value::as_str).map(str::to_string)
}

fn read_blocks(nodes: &[Value]) -> Vec<BlockNode> {
    nodes.iter().filter_map(read_block).collect()
}

fn read_block(node: &Value) -> Option<BlockNode> {
    let block = match node_type(node) {
        "paragraph" => BlockNode::Paragraph(Paragraph {
            inline: read_inlines(children(node)),
            text_align: attr_str(node, "textAlign"),
        }),
        "heading" => {
            let level = attr(node, "level")
                .and_then(|level| level.as_u64().or_else(|| level.as_f64().map(|f| f as u64)))
                .unwrap_or(1) as usize;
            let mut heading = Heading::new(level, read_inlines(children(node)));
            heading.id = attr_str(node, "id");
            heading.text_align = attr_str(node, "textAlign");
            BlockNode::Heading(heading)
        }
        "bulletList" => BlockNode::BulletList(BulletList {
            items: read_items(children(node)),
        }),
        "orderedList" => BlockNode::OrderedList(OrderedList {
            start_order: attr(node, "order")
                .and_then(Value::as_u64)
                .and_then(|order| u32::try_from(order).ok())
                .unwrap_or(1),
            items: read_items(children(node)),
        }),
        "taskList" => {
            let mut items = Vec::new();
            collect_tasks(children(node), &mut items);
            BlockNode::TaskList(TaskList {
                local_id: attr_str(node, "localId").unwrap_or_else(generate_local_id),
                items,
            })
        }
        "codeBlock" => BlockNode::CodeBlock(CodeBlock {
            language: attr_str(node, "language").unwrap_or_default(),
            text: children(node)
                .iter()
                .filter_map(|child| child.get("text").and_then(Value::as_str))
                .collect(),
        }),
        "blockquote" => BlockNode::Blockquote(Blockquote {
            blocks: read_blocks(children(node)),
        }),
        "rule" => BlockNode::Rule,
        "panel" => BlockNode::Panel(Panel {
            panel_type: attr_str(node, "panelType")
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| Panel::DEFAULT_TYPE.to_string()),
            blocks: read_blocks(children(node)),
        }),
        "expand" | "nestedExpand" => BlockNode::Expand(Expand {
            title: attr_str(node, "title").unwrap_or_default(),
            blocks: read_blocks(children(node)),
        }),
        "table" => BlockNode::Table(Table {
            rows: children(node)
                .iter()
                .filter(|row| node_type(row) == "tableRow")
                .map(read_row)
                .collect(),
        }),
        "mediaSingle" => {
            let media = children(node)
                .iter()
                .find(|child| node_type(child) == "media")
                .map(read_media)
                .unwrap_or_default();
            let mut single = MediaSingle::new(media);
            if let Some(layout) = attr_str(node, "layout").filter(|l| !l.is_empty()) {
                single.layout = layout;
            }
            single.width = attr(node, "width").and_then(Value::as_f64);
            single.width_type = attr_str(node, "widthType");
            BlockNode::MediaSingle(single)
        }
        "mediaGroup" => BlockNode::MediaGroup(MediaGroup {
            items: children(node)
                .iter()
                .filter(|child| node_type(child) == "media")
                .map(read_media)
                .collect(),
        }),
        other => {
            tracing::debug!(node_type = other, "skipping unsupported block node");
            return None;
        }
    };
    Some(block)
}

fn read_items(nodes: &[Value]) -> Vec<ListItem> {
    nodes
        .iter()
        .filter(|item| node_type(item) == "listItem")
        .map(|item| ListItem {
            blocks: read_blocks(children(item)),
        })
        .collect()
}

/// Task items in order, flattening nested task lists.
fn collect_tasks(nodes: &[Value], out: &mut Vec<TaskItem>) {
    for node in nodes {
        match node_type(node) {
            "taskItem" => out.push(TaskItem {
                local_id: attr_str(node, "localId").unwrap_or_else(generate_local_id),
                state: match attr(node, "state").and_then(Value::as_str) {
                    Some("DONE") => TaskState::Done,
                    _ => TaskState::Todo,
                },
                inline: read_inlines(children(node)),
            }),
            "taskList" => collect_tasks(children(node), out),
            other => tracing::debug!(node_type = other, "skipping task list child"),
        }
    }
}

fn read_row(row: &Value) -> TableRow {
    TableRow {
        cells: children(row)
            .iter()
            .filter_map(|cell| {
                let is_header = match node_type(cell) {
                    "tableHeader" => true,
                    "tableCell" => false,
                    _ => return None,
                };
                Some(TableCell {
                    is_header,
                    blocks: read_blocks(children(cell)),
                })
            })
            .collect(),
    }
}

fn read_media(node: &Value) -> MediaNode {
    MediaNode {
        id: attr_str(node, "id").unwrap_or_default(),
        collection: attr_str(node, "collection").filter(|c| !c.is_empty()),
        media_type: attr_str(node, "type").unwrap_or_else(|| "file".to_string()),
        alt: attr_str(node, "alt").unwrap_or_default(),
        pending_source: attr_str(node, SOURCE_ATTR),
    }
}

fn read_inlines(nodes: &[Value]) -> Vec<InlineNode> {
    nodes.iter().filter_map(read_inline).collect()
}

fn read_inline(node: &Value) -> Option<InlineNode> {
    let inline = match node_type(node) {
        "text" => InlineNode::Text(Text {
            text: node
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: node
                .get("marks")
                .and_then(Value::as_array)
                .map(|marks| marks.iter().filter_map(read_mark).collect())
                .unwrap_or_default(),
        }),
        "hardBreak" => InlineNode::HardBreak,
        "emoji" => InlineNode::Emoji(Emoji {
            short_name: attr_str(node, "shortName"),
            text: attr_str(node, "text"),
        }),
        "mention" => InlineNode::Mention(Mention {
            id: attr_str(node, "id").unwrap_or_default(),
            display_text: attr_str(node, "text").unwrap_or_default(),
        }),
        "status" => InlineNode::Status(Status {
            text: attr_str(node, "text").unwrap_or_default(),
            color: attr_str(node, "color"),
            local_id: attr_str(node, "localId").unwrap_or_else(generate_local_id),
        }),
        "date" => InlineNode::Date(DateStamp {
            timestamp: match attr(node, "timestamp") {
                Some(Value::String(timestamp)) => timestamp.clone(),
                Some(Value::Number(timestamp)) => timestamp.to_string(),
                _ => String::new(),
            },
        }),
        "inlineCard" => InlineNode::InlineCard(InlineCard {
            url: attr_str(node, "url").unwrap_or_default(),
        }),
        other => {
            tracing::debug!(node_type = other, "skipping unsupported inline node");
            return None;
        }
    };
    Some(inline)
}

fn read_mark(mark: &Value) -> Option<Mark> {
    let color = || attr_str(mark, "color").unwrap_or_default();
    let mark = match node_type(mark) {
        "strong" => Mark::Strong,
        "em" => Mark::Em,
        "code" => Mark::Code,
        "strike" => Mark::Strike,
        "underline" => Mark::Underline,
        "link" => Mark::Link {
            href: attr_str(mark, "href").unwrap_or_default(),
            title: attr_str(mark, "title"),
        },
        "textColor" => Mark::TextColor { color: color() },
        "backgroundColor" => Mark::BackgroundColor { color: color() },
        "subsup" => Mark::Subsup {
            kind: match attr(mark, "type").and_then(Value::as_str) {
                Some("sub") => SubSup::Sub,
                Some("sup") => SubSup::Sup,
                _ => return None,
            },
        },
        other => {
            tracing::debug!(mark = other, "skipping unsupported mark");
            return None;
        }
    };
    Some(mark)
}
