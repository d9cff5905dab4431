/*
 * merge.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Template merging: substitute submitted values for variable placeholders.

use blockdocs_types::{
    Block, BlockContent, FormData, InlineContent, MergedBlock, MergedInline,
};

/// Merge a template with submitted form data.
///
/// Every block is rebuilt: `id`, `type`, and `props` copy verbatim, content
/// goes through the per-item merge rule, children merge recursively. Absent
/// children stay absent, as does content whose every item was elided — the
/// writers rely on `None` rather than `Some(vec![])` to mean "nothing
/// here".
///
/// A variable with no submitted value (or an empty one) produces no output
/// at all. That includes required-but-unanswered fields: they vanish from
/// the generated document rather than rendering as blank space. This is
/// intentional; enforcing `required` is the form's job, not the merge's.
pub fn merge_template(blocks: &[Block], data: &FormData) -> Vec<MergedBlock> {
    blocks.iter().map(|block| merge_block(block, data)).collect()
}

fn merge_block(block: &Block, data: &FormData) -> MergedBlock {
    MergedBlock {
        id: block.id.clone(),
        kind: block.kind.clone(),
        props: block.props.clone(),
        content: block
            .content
            .as_ref()
            .and_then(|content| merge_content(content, data)),
        children: block
            .children
            .as_ref()
            .map(|children| merge_template(children, data)),
    }
}

fn merge_content(content: &BlockContent, data: &FormData) -> Option<Vec<MergedInline>> {
    let items = match content {
        // Plain-string content never contains variables.
        BlockContent::Text(text) => {
            return Some(vec![MergedInline::Text {
                text: text.clone(),
                styles: Default::default(),
            }]);
        }
        BlockContent::Inline(items) => items,
    };

    let mut merged = Vec::with_capacity(items.len());
    for item in items {
        match item {
            InlineContent::Text { text, styles } => merged.push(MergedInline::Text {
                text: text.clone(),
                styles: *styles,
            }),
            InlineContent::Link { text, props, styles } => merged.push(MergedInline::Link {
                text: text.clone(),
                href: props.href.clone(),
                styles: *styles,
            }),
            InlineContent::Variable { props, styles } => {
                let value = data.get(&props.name).map(String::as_str).unwrap_or("");
                if !value.is_empty() {
                    merged.push(MergedInline::Text {
                        text: value.to_string(),
                        styles: *styles,
                    });
                }
            }
            // Inline kinds this core does not understand are elided.
            InlineContent::Unknown => {}
        }
    }

    if merged.is_empty() { None } else { Some(merged) }
}
