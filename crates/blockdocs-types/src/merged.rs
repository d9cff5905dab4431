/*
 * merged.rs
 * Copyright (c) 2025 blockdocs contributors
 */

use crate::block::{BlockKind, Props, TextAlignment};
use crate::inline::Styles;
use serde::{Deserialize, Serialize};

/// A block after variable substitution.
///
/// Structurally identical to [`crate::Block`] except that inline content is
/// restricted to text and links: variables no longer exist after a merge,
/// and this is the only tree the document writers accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    /// `None` means "no content", which is distinct from an empty list and
    /// is what an all-elided merge produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<MergedInline>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MergedBlock>>,
}

impl MergedBlock {
    /// True when the block carries at least one inline item.
    pub fn has_content(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// The inline items, empty when content is absent.
    pub fn inline_content(&self) -> &[MergedInline] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// The child blocks, empty when children are absent.
    pub fn child_blocks(&self) -> &[MergedBlock] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Alignment from the `textAlignment` prop, if recognized.
    pub fn alignment(&self) -> Option<TextAlignment> {
        self.props
            .get("textAlignment")
            .and_then(|v| v.as_str())
            .and_then(TextAlignment::from_prop)
    }

    /// Heading level from the `level` prop, defaulting to 1.
    pub fn heading_level(&self) -> u64 {
        self.props
            .get("level")
            .and_then(|v| v.as_u64())
            .unwrap_or(1)
    }
}

/// Inline content after merging: text and links only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MergedInline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
    Link {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
}

impl MergedInline {
    pub fn text(&self) -> &str {
        match self {
            MergedInline::Text { text, .. } | MergedInline::Link { text, .. } => text,
        }
    }

    pub fn styles(&self) -> Styles {
        match self {
            MergedInline::Text { styles, .. } | MergedInline::Link { styles, .. } => *styles,
        }
    }

    /// The link target, for link items that carry one.
    pub fn href(&self) -> Option<&str> {
        match self {
            MergedInline::Link { href, .. } => href.as_deref(),
            MergedInline::Text { .. } => None,
        }
    }
}
