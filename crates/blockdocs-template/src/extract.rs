/*
 * extract.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Variable extraction: pre-order walk of the block forest.

use blockdocs_types::{Block, BlockContent, InlineContent, VariableProps};

/// Collect every variable placeholder in the forest, in document order.
///
/// The walk is depth-first pre-order: a block's own content is inspected
/// before its children, children before the next sibling. Plain-string
/// content cannot hold variables and is skipped. No deduplication happens
/// here: two placeholders sharing a name both appear in the result, in
/// encounter order.
pub fn extract_variables(blocks: &[Block]) -> Vec<VariableProps> {
    let mut variables = Vec::new();
    for block in blocks {
        walk_block(block, &mut variables);
    }
    variables
}

fn walk_block(block: &Block, variables: &mut Vec<VariableProps>) {
    if let Some(BlockContent::Inline(items)) = &block.content {
        for item in items {
            if let InlineContent::Variable { props, .. } = item {
                variables.push(props.clone());
            }
        }
    }
    if let Some(children) = &block.children {
        for child in children {
            walk_block(child, variables);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdocs_types::{BlockKind, Props};

    fn variable(name: &str) -> InlineContent {
        InlineContent::variable(VariableProps {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn paragraph_with(content: Vec<InlineContent>, children: Option<Vec<Block>>) -> Block {
        Block {
            id: None,
            kind: BlockKind::Paragraph,
            props: Props::new(),
            content: Some(BlockContent::Inline(content)),
            children,
        }
    }

    #[test]
    fn test_extraction_is_preorder_depth_first() {
        // A at depth 0, B at depth 1 (child of the first block), C at depth 0
        // on a later sibling: document order is [A, B, C].
        let blocks = vec![
            paragraph_with(
                vec![variable("A")],
                Some(vec![paragraph_with(vec![variable("B")], None)]),
            ),
            paragraph_with(vec![variable("C")], None),
        ];

        let names: Vec<String> = extract_variables(&blocks)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_children_visited_before_next_sibling() {
        let blocks = vec![
            paragraph_with(
                vec![variable("first")],
                Some(vec![paragraph_with(
                    vec![variable("nested")],
                    Some(vec![paragraph_with(vec![variable("deep")], None)]),
                )]),
            ),
            paragraph_with(vec![variable("last")], None),
        ];

        let names: Vec<String> = extract_variables(&blocks)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["first", "nested", "deep", "last"]);
    }

    #[test]
    fn test_plain_string_content_is_skipped() {
        let block = Block {
            content: Some(BlockContent::Text("no variables here".to_string())),
            ..Block::new(BlockKind::Paragraph)
        };
        assert!(extract_variables(&[block]).is_empty());
    }

    #[test]
    fn test_missing_content_extracts_nothing() {
        let block = Block::new(BlockKind::Paragraph);
        assert!(extract_variables(&[block]).is_empty());
    }

    #[test]
    fn test_non_variable_inlines_are_ignored() {
        let blocks = vec![paragraph_with(
            vec![
                InlineContent::text("hello"),
                InlineContent::Unknown,
                variable("x"),
            ],
            None,
        )];
        let extracted = extract_variables(&blocks);
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].name, "x");
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let blocks = vec![paragraph_with(vec![variable("x"), variable("x")], None)];
        assert_eq!(extract_variables(&blocks).len(), 2);
    }
}
