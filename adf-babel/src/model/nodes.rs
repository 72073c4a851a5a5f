//! Core data structures for the document model.
//!
//! Every node kind is a closed variant so that parsing and rendering dispatch
//! exhaustively. Field names follow Rust conventions; the wire JSON codec in
//! `formats::adf` maps them onto the host platform's camelCase attributes.

use serde::Serialize;

/// The root of a document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "document")]
pub struct Document {
    pub version: u32,
    pub blocks: Vec<BlockNode>,
}

impl Document {
    /// Schema version written by this crate.
    pub const VERSION: u32 = 1;

    pub fn new(blocks: Vec<BlockNode>) -> Self {
        Document {
            version: Self::VERSION,
            blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockNode {
    Paragraph(Paragraph),
    Heading(Heading),
    BulletList(BulletList),
    OrderedList(OrderedList),
    TaskList(TaskList),
    CodeBlock(CodeBlock),
    Blockquote(Blockquote),
    Rule,
    Panel(Panel),
    Expand(Expand),
    Table(Table),
    MediaSingle(MediaSingle),
    MediaGroup(MediaGroup),
}

impl BlockNode {
    /// Name of the node kind, as used by the tree visualisation.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockNode::Paragraph(_) => "Paragraph",
            BlockNode::Heading(_) => "Heading",
            BlockNode::BulletList(_) => "BulletList",
            BlockNode::OrderedList(_) => "OrderedList",
            BlockNode::TaskList(_) => "TaskList",
            BlockNode::CodeBlock(_) => "CodeBlock",
            BlockNode::Blockquote(_) => "Blockquote",
            BlockNode::Rule => "Rule",
            BlockNode::Panel(_) => "Panel",
            BlockNode::Expand(_) => "Expand",
            BlockNode::Table(_) => "Table",
            BlockNode::MediaSingle(_) => "MediaSingle",
            BlockNode::MediaGroup(_) => "MediaGroup",
        }
    }
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Paragraph {
    pub inline: Vec<InlineNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl Paragraph {
    pub fn new(inline: Vec<InlineNode>) -> Self {
        Paragraph {
            inline,
            text_align: None,
        }
    }
}

/// A heading; `level` is always within 1..=6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub inline: Vec<InlineNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl Heading {
    pub const MAX_LEVEL: u8 = 6;

    /// Builds a heading, clamping `level` into the supported range.
    pub fn new(level: usize, inline: Vec<InlineNode>) -> Self {
        Heading {
            level: clamp_level(level),
            inline,
            id: None,
            text_align: None,
        }
    }
}

pub(crate) fn clamp_level(level: usize) -> u8 {
    level.clamp(1, Heading::MAX_LEVEL as usize) as u8
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BulletList {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedList {
    pub start_order: u32,
    pub items: Vec<ListItem>,
}

impl Default for OrderedList {
    fn default() -> Self {
        OrderedList {
            start_order: 1,
            items: Vec::new(),
        }
    }
}

/// An item of a bullet or ordered list.
///
/// The first block is conventionally a paragraph; later blocks are nested
/// lists or continuation paragraphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListItem {
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskList {
    pub local_id: String,
    pub items: Vec<TaskItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Todo,
    Done,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Todo => "TODO",
            TaskState::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskItem {
    pub local_id: String,
    pub state: TaskState,
    pub inline: Vec<InlineNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CodeBlock {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Blockquote {
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub panel_type: String,
    pub blocks: Vec<BlockNode>,
}

impl Panel {
    pub const DEFAULT_TYPE: &'static str = "info";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Expand {
    pub title: String,
    pub blocks: Vec<BlockNode>,
}

/// A table. Rows may have differing cell counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableCell {
    pub is_header: bool,
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSingle {
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_type: Option<String>,
    pub media: MediaNode,
}

impl MediaSingle {
    pub const DEFAULT_LAYOUT: &'static str = "align-start";
    pub const DEFAULT_WIDTH_TYPE: &'static str = "pixel";

    pub fn new(media: MediaNode) -> Self {
        MediaSingle {
            layout: Self::DEFAULT_LAYOUT.to_string(),
            width: None,
            width_type: None,
            media,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaGroup {
    pub items: Vec<MediaNode>,
}

/// A media reference.
///
/// `pending_source` is set only for media that still has to be uploaded; `id`
/// then holds a `__PENDING_UPLOAD_…__` placeholder. See `model::media`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    pub media_type: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_source: Option<String>,
}

/// Inline content of paragraphs, headings, task items and table cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InlineNode {
    Text(Text),
    HardBreak,
    Emoji(Emoji),
    Mention(Mention),
    Status(Status),
    Date(DateStamp),
    InlineCard(InlineCard),
}

impl InlineNode {
    /// Plain, unmarked text.
    pub fn text(text: impl Into<String>) -> Self {
        InlineNode::Text(Text::plain(text))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InlineNode::Text(_) => "Text",
            InlineNode::HardBreak => "HardBreak",
            InlineNode::Emoji(_) => "Emoji",
            InlineNode::Mention(_) => "Mention",
            InlineNode::Status(_) => "Status",
            InlineNode::Date(_) => "Date",
            InlineNode::InlineCard(_) => "InlineCard",
        }
    }
}

/// A run of text with formatting marks.
///
/// Marks are conceptually a set; the renderer applies them in a fixed order
/// regardless of their position here.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Text {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, mark: Mark) -> Self {
        Text {
            text: text.into(),
            marks: vec![mark],
        }
    }

    /// Whether a mark of the same kind as `mark` is present (attributes ignored).
    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks
            .iter()
            .any(|m| std::mem::discriminant(m) == std::mem::discriminant(mark))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Strike,
    Underline,
    Link {
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    TextColor {
        color: String,
    },
    BackgroundColor {
        color: String,
    },
    Subsup {
        kind: SubSup,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubSup {
    Sub,
    Sup,
}

impl SubSup {
    pub fn as_str(self) -> &'static str {
        match self {
            SubSup::Sub => "sub",
            SubSup::Sup => "sup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Emoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A user mention. `display_text` keeps the host's `@Name` form.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Mention {
    pub id: String,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Status {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub local_id: String,
}

/// A date; `timestamp` is milliseconds since the epoch, kept as a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DateStamp {
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InlineCard {
    pub url: String,
}
