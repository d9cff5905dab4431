/*
 * lib.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Template merging and document generation for blockdocs.
//!
//! This crate owns the second half of the fill-and-generate pipeline:
//!
//! 1. [`merge_template`] substitutes submitted values for variable
//!    placeholders, producing a variable-free [`MergedBlock`] tree.
//! 2. The writers serialize that tree into a binary document:
//!    [`writers::docx::render_to_docx`] emits an Office Open XML package,
//!    [`writers::pdf::render_to_pdf`] emits a PDF file.
//!
//! Merging is total and pure; only the writers are fallible, and their
//! errors are meant to be surfaced to the user ("generation failed"), never
//! retried internally.
//!
//! ```
//! use blockdocs_document::{merge_template, writers::docx::render_to_docx};
//! use blockdocs_types::{Block, DocumentOptions, FormData, InlineContent, VariableProps};
//!
//! let template = vec![Block::paragraph(vec![InlineContent::variable(
//!     VariableProps { name: "email".to_string(), ..Default::default() },
//! )])];
//! let mut data = FormData::new();
//! data.insert("email".to_string(), "a@b.com".to_string());
//!
//! let merged = merge_template(&template, &data);
//! let bytes = render_to_docx(&merged, &DocumentOptions::default()).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

pub mod error;
pub mod merge;
pub mod writers;

pub use error::{DocxError, PdfError};
pub use merge::merge_template;

// Re-exported so writer callers only need this crate.
pub use blockdocs_types::{DocumentOptions, MergedBlock, MergedInline};
