/*
 * block.rs
 * Copyright (c) 2025 blockdocs contributors
 */

use crate::inline::InlineContent;
use serde::{Deserialize, Serialize};

/// Named attributes attached to a block (`level`, `textAlignment`, ...).
///
/// Kept as an open JSON object map: the editor attaches props this core
/// does not interpret, and they must survive a merge untouched.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// The structural kind of a block.
///
/// The vocabulary is open: kinds this core does not recognize are kept
/// verbatim in [`BlockKind::Other`] so that writers can apply their
/// plain-paragraph fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Paragraph,
    Heading,
    BulletListItem,
    NumberedListItem,
    Table,
    Other(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::BulletListItem => "bulletListItem",
            BlockKind::NumberedListItem => "numberedListItem",
            BlockKind::Table => "table",
            BlockKind::Other(tag) => tag,
        }
    }

    /// True for the two list-item kinds.
    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::BulletListItem | BlockKind::NumberedListItem)
    }
}

impl From<String> for BlockKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "paragraph" => BlockKind::Paragraph,
            "heading" => BlockKind::Heading,
            "bulletListItem" => BlockKind::BulletListItem,
            "numberedListItem" => BlockKind::NumberedListItem,
            "table" => BlockKind::Table,
            _ => BlockKind::Other(s),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Block content: the editor emits either a plain string or a sequence of
/// inline items. Plain-string content never contains variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Text(String),
    Inline(Vec<InlineContent>),
}

/// One node of the document block tree.
///
/// Invariant: the tree is strictly a tree (no cycles, exclusive child
/// ownership). This core only ever traverses blocks read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BlockContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl Block {
    /// A block of the given kind with no props, content, or children.
    pub fn new(kind: BlockKind) -> Self {
        Block {
            id: None,
            kind,
            props: Props::new(),
            content: None,
            children: None,
        }
    }

    /// A paragraph block with the given inline content.
    pub fn paragraph(content: Vec<InlineContent>) -> Self {
        Block {
            content: Some(BlockContent::Inline(content)),
            ..Block::new(BlockKind::Paragraph)
        }
    }

    /// Look up a string-valued prop.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(|v| v.as_str())
    }

    /// Look up an integer-valued prop.
    pub fn prop_u64(&self, name: &str) -> Option<u64> {
        self.props.get(name).and_then(|v| v.as_u64())
    }
}

/// Paragraph alignment, parsed from the `textAlignment` prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    /// Parse an alignment prop value. Unrecognized values mean "default",
    /// which writers express by omitting alignment entirely.
    pub fn from_prop(value: &str) -> Option<TextAlignment> {
        match value {
            "left" => Some(TextAlignment::Left),
            "center" => Some(TextAlignment::Center),
            "right" => Some(TextAlignment::Right),
            "justify" => Some(TextAlignment::Justify),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_round_trips_unknown_tags() {
        let kind = BlockKind::from("customWidget".to_string());
        assert_eq!(kind, BlockKind::Other("customWidget".to_string()));
        assert_eq!(String::from(kind), "customWidget");
    }

    #[test]
    fn test_block_deserializes_editor_json() {
        let block: Block = serde_json::from_str(
            r#"{
                "id": "b1",
                "type": "heading",
                "props": {"level": 2, "textAlignment": "center"},
                "content": [{"type": "text", "text": "Title"}]
            }"#,
        )
        .unwrap();
        assert_eq!(block.kind, BlockKind::Heading);
        assert_eq!(block.prop_u64("level"), Some(2));
        assert_eq!(block.prop_str("textAlignment"), Some("center"));
        assert!(block.children.is_none());
    }

    #[test]
    fn test_string_content_deserializes() {
        let block: Block =
            serde_json::from_str(r#"{"type": "paragraph", "content": "plain"}"#).unwrap();
        assert_eq!(
            block.content,
            Some(BlockContent::Text("plain".to_string()))
        );
    }

    #[test]
    fn test_missing_content_is_none_not_empty() {
        let block: Block = serde_json::from_str(r#"{"type": "paragraph"}"#).unwrap();
        assert!(block.content.is_none());
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!(TextAlignment::from_prop("justify"), Some(TextAlignment::Justify));
        assert_eq!(TextAlignment::from_prop("middle"), None);
    }
}
