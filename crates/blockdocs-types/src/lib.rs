/*
 * lib.rs
 * Copyright (c) 2025 blockdocs contributors
 *
 * Type definitions for the blockdocs template/merge/render core.
 *
 * This crate provides pure data type definitions for the editor block
 * tree, the post-merge document tree, form schemas, and document
 * rendering options. It has minimal dependencies (serde, serde_json)
 * and can be used by any crate that needs to work with blockdocs
 * document structures.
 */

pub mod block;
pub mod form;
pub mod inline;
pub mod merged;
pub mod options;

// Re-export commonly used types at the crate root
pub use block::{Block, BlockContent, BlockKind, Props, TextAlignment};
pub use form::{FieldOption, FieldSchema, FormData, FormSchema, ValidationRule};
pub use inline::{FieldType, InlineContent, LinkProps, Styles, VariableProps};
pub use merged::{MergedBlock, MergedInline};
pub use options::{DocumentOptions, Margins, PageSize, ResolvedMargins};
