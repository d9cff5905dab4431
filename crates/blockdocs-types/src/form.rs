/*
 * form.rs
 * Copyright (c) 2025 blockdocs contributors
 */

use crate::inline::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A submission: flat field-name to string-value mapping.
///
/// Values are always strings; number and checkbox fields arrive as their
/// string serialization (`"true"`/`"false"` for checkbox) and coercion is
/// the UI boundary's concern. Note that two same-named fields cannot be
/// distinguished here: extraction keeps duplicate variable names, but a
/// map-based submission gives both the same value.
pub type FormData = HashMap<String, String>;

/// The declarative description of a form derived from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

/// One form field, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<ValidationRule>>,
    /// Present only for option-bearing kinds (select, radio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

/// A validation rule attached to a field.
///
/// This core only ever emits `required`; the form collaborator understands
/// more rule kinds, but they never originate from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationRule {
    Required { message: String },
}

/// One entry of a select/radio option list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}
