//! Icon mapping for the tree visualization format
//!
//! Keys are the node kind names returned by `BlockNode::kind` and
//! `InlineNode::kind`, plus the child structs that have no enum variant.

/// Get the Unicode icon for a given node kind
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "§",
        "BulletList" => "☰",
        "OrderedList" => "☷",
        "ListItem" => "•",
        "TaskList" => "☑",
        "TaskItem" => "☐",
        "CodeBlock" => "𝒱",
        "Blockquote" => "\"",
        "Rule" => "⎯",
        "Panel" => "▣",
        "Expand" => "▸",
        "Table" => "▦",
        "TableRow" => "═",
        "TableCell" => "▫",
        "TableHeader" => "▪",
        "MediaSingle" => "▧",
        "MediaGroup" => "▤",
        "Media" => "◫",
        "Text" => "◦",
        "HardBreak" => "↵",
        "Emoji" => "☺",
        "Mention" => "@",
        "Status" => "◉",
        "Date" => "◷",
        "InlineCard" => "⊕",
        _ => "○",
    }
}
