//! Media references and the pending-upload placeholder convention.
//!
//! A source that is not an attachment reference (`jira-media:id:collection:type`)
//! becomes a pending node: its id is a `__PENDING_UPLOAD_…__` placeholder and
//! `pending_source` keeps the original URL or path. An upload step outside this
//! crate walks [`Document::pending_media_mut`] and calls [`MediaNode::resolve`].

use super::nodes::{BlockNode, Document, MediaNode};
use crate::common::pending_media_id;

/// URL scheme of the reserved attachment reference syntax.
pub const MEDIA_SCHEME: &str = "jira-media:";
const DEFAULT_MEDIA_TYPE: &str = "file";

impl MediaNode {
    /// Classifies an image source into a resolved or a pending media node.
    pub fn from_source(source: &str, alt: &str) -> Self {
        if let Some(reference) = source.strip_prefix(MEDIA_SCHEME) {
            let mut parts = reference.splitn(3, ':');
            if let (Some(id), Some(collection), Some(media_type)) =
                (parts.next(), parts.next(), parts.next())
            {
                if !id.is_empty() {
                    return MediaNode {
                        id: id.to_string(),
                        collection: Some(collection.to_string()).filter(|c| !c.is_empty()),
                        media_type: media_type.to_string(),
                        alt: alt.to_string(),
                        pending_source: None,
                    };
                }
            }
        }
        Self::pending(source, alt)
    }

    /// A placeholder for media that still has to be uploaded.
    pub fn pending(source: &str, alt: &str) -> Self {
        tracing::debug!(source, "media source needs upload, using placeholder");
        MediaNode {
            id: pending_media_id(),
            collection: None,
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            alt: alt.to_string(),
            pending_source: Some(source.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_source.is_some()
    }

    /// Replaces the placeholder with the identity assigned by the upload.
    pub fn resolve(&mut self, id: impl Into<String>, collection: impl Into<String>) {
        self.id = id.into();
        self.collection = Some(collection.into()).filter(|c| !c.is_empty());
        self.pending_source = None;
    }

    /// The `jira-media:id:collection:type` reference, for resolved nodes with an id.
    pub fn reference(&self) -> Option<String> {
        if self.is_pending() || self.id.is_empty() {
            return None;
        }
        Some(format!(
            "{MEDIA_SCHEME}{}:{}:{}",
            self.id,
            self.collection.as_deref().unwrap_or_default(),
            self.media_type
        ))
    }
}

impl Document {
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Every pending media node, depth first.
    pub fn pending_media(&self) -> Vec<&MediaNode> {
        let mut found = Vec::new();
        collect_media(&self.blocks, &mut found);
        found.retain(|media| media.is_pending());
        found
    }

    /// Mutable access to every pending media node, depth first.
    pub fn pending_media_mut(&mut self) -> Vec<&mut MediaNode> {
        let mut found = Vec::new();
        collect_media_mut(&mut self.blocks, &mut found);
        found.retain(|media| media.is_pending());
        found
    }
}

fn collect_media<'a>(blocks: &'a [BlockNode], out: &mut Vec<&'a MediaNode>) {
    for block in blocks {
        match block {
            BlockNode::MediaSingle(single) => out.push(&single.media),
            BlockNode::MediaGroup(group) => out.extend(group.items.iter()),
            BlockNode::BulletList(list) => {
                for item in &list.items {
                    collect_media(&item.blocks, out);
                }
            }
            BlockNode::OrderedList(list) => {
                for item in &list.items {
                    collect_media(&item.blocks, out);
                }
            }
            BlockNode::Blockquote(quote) => collect_media(&quote.blocks, out),
            BlockNode::Panel(panel) => collect_media(&panel.blocks, out),
            BlockNode::Expand(expand) => collect_media(&expand.blocks, out),
            BlockNode::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    collect_media(&cell.blocks, out);
                }
            }
            BlockNode::Paragraph(_)
            | BlockNode::Heading(_)
            | BlockNode::TaskList(_)
            | BlockNode::CodeBlock(_)
            | BlockNode::Rule => {}
        }
    }
}

fn collect_media_mut<'a>(blocks: &'a mut [BlockNode], out: &mut Vec<&'a mut MediaNode>) {
    for block in blocks {
        match block {
            BlockNode::MediaSingle(single) => out.push(&mut single.media),
            BlockNode::MediaGroup(group) => out.extend(group.items.iter_mut()),
            BlockNode::BulletList(list) => {
                for item in &mut list.items {
                    collect_media_mut(&mut item.blocks, out);
                }
            }
            BlockNode::OrderedList(list) => {
                for item in &mut list.items {
                    collect_media_mut(&mut item.blocks, out);
                }
            }
            BlockNode::Blockquote(quote) => collect_media_mut(&mut quote.blocks, out),
            BlockNode::Panel(panel) => collect_media_mut(&mut panel.blocks, out),
            BlockNode::Expand(expand) => collect_media_mut(&mut expand.blocks, out),
            BlockNode::Table(table) => {
                for cell in table.rows.iter_mut().flat_map(|row| &mut row.cells) {
                    collect_media_mut(&mut cell.blocks, out);
                }
            }
            BlockNode::Paragraph(_)
            | BlockNode::Heading(_)
            | BlockNode::TaskList(_)
            | BlockNode::CodeBlock(_)
            | BlockNode::Rule => {}
        }
    }
}
