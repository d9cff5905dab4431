/*
 * lib.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Turns a blockdocs template into a fillable form description.
//!
//! A template is an ordinary block-tree document whose inline content may
//! contain variable placeholders. This crate walks the tree, collects the
//! placeholders, and builds a [`FormSchema`](blockdocs_types::FormSchema) a
//! generic form renderer can
//! consume:
//!
//! ```
//! use blockdocs_template::blocks_to_form_schema;
//! use blockdocs_types::{Block, InlineContent, VariableProps};
//!
//! let template = vec![Block::paragraph(vec![
//!     InlineContent::text("Contact: "),
//!     InlineContent::variable(VariableProps {
//!         name: "email".to_string(),
//!         label: "Email".to_string(),
//!         ..Default::default()
//!     }),
//! ])];
//!
//! let schema = blocks_to_form_schema(&template, None);
//! assert_eq!(schema.fields.len(), 1);
//! assert_eq!(schema.fields[0].name, "email");
//! ```
//!
//! Both steps are total: malformed blocks extract as "no variable here"
//! and unparseable option lists degrade to empty, so a template written by
//! an older editor version never fails here.

pub mod extract;
pub mod schema;

pub use extract::extract_variables;
pub use schema::{blocks_to_form_schema, variables_to_form_schema, DEFAULT_FORM_ID};
