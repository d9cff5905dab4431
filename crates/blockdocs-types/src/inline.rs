/*
 * inline.rs
 * Copyright (c) 2025 blockdocs contributors
 */

use crate::form::FieldOption;
use serde::{Deserialize, Serialize};

/// One atomic unit of inline content inside a block.
///
/// The editor produces more inline kinds than the pipeline understands
/// (mentions, equations, ...). Those deserialize to [`InlineContent::Unknown`]
/// and are inert: extraction skips them and merging drops them, but neither
/// ever fails on one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineContent {
    Text {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
    Link {
        #[serde(default)]
        text: String,
        #[serde(default)]
        props: LinkProps,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
    Variable {
        #[serde(default)]
        props: VariableProps,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
    /// Any inline kind this core does not understand.
    #[serde(other)]
    Unknown,
}

impl InlineContent {
    /// Convenience constructor for an unstyled text run.
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text {
            text: text.into(),
            styles: Styles::default(),
        }
    }

    /// Convenience constructor for a variable placeholder.
    pub fn variable(props: VariableProps) -> Self {
        InlineContent::Variable {
            props,
            styles: Styles::default(),
        }
    }
}

/// Type-specific props for a link inline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Inline style flags. Absent means false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
}

impl Styles {
    /// True when no style flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strike)
    }
}

/// Configuration stored on a variable placeholder.
///
/// `options` keeps the upstream JSON-encoded representation; it is parsed
/// lazily (and defensively) via [`VariableProps::parse_options`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VariableProps {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub placeholder: String,
    pub required: bool,
    /// JSON-encoded `[{label, value}, ...]`, relevant for select/radio.
    pub options: String,
}

impl VariableProps {
    /// Parse the serialized option list.
    ///
    /// Absent or unparseable JSON degrades to an empty list; this never
    /// fails.
    pub fn parse_options(&self) -> Vec<FieldOption> {
        serde_json::from_str(&self.options).unwrap_or_default()
    }
}

/// The form-control kind a variable materializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
        }
    }

    /// True for kinds whose schema carries an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

// Templates authored against a newer editor may carry field kinds this
// version does not know; degrade to a plain text field rather than
// failing deserialization.
impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "textarea" => FieldType::Textarea,
            "select" => FieldType::Select,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            _ => FieldType::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_inline_kind_deserializes_to_unknown() {
        let item: InlineContent =
            serde_json::from_str(r#"{"type": "mention", "props": {"user": "ada"}}"#).unwrap();
        assert_eq!(item, InlineContent::Unknown);
    }

    #[test]
    fn test_text_inline_defaults() {
        let item: InlineContent = serde_json::from_str(r#"{"type": "text"}"#).unwrap();
        assert_eq!(item, InlineContent::text(""));
    }

    #[test]
    fn test_styles_absent_means_false() {
        let item: InlineContent =
            serde_json::from_str(r#"{"type": "text", "text": "hi", "styles": {"bold": true}}"#)
                .unwrap();
        match item {
            InlineContent::Text { styles, .. } => {
                assert!(styles.bold);
                assert!(!styles.italic);
                assert!(!styles.is_plain());
            }
            other => panic!("expected text inline, got {:?}", other),
        }
    }

    #[test]
    fn test_variable_props_camel_case() {
        let item: InlineContent = serde_json::from_str(
            r#"{
                "type": "variable",
                "props": {
                    "name": "email",
                    "label": "Email",
                    "fieldType": "email",
                    "placeholder": "you@example.com",
                    "required": true,
                    "options": ""
                }
            }"#,
        )
        .unwrap();
        match item {
            InlineContent::Variable { props, .. } => {
                assert_eq!(props.name, "email");
                assert_eq!(props.field_type, FieldType::Email);
                assert!(props.required);
            }
            other => panic!("expected variable inline, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_field_type_falls_back_to_text() {
        let props: VariableProps =
            serde_json::from_str(r#"{"name": "x", "fieldType": "signature"}"#).unwrap();
        assert_eq!(props.field_type, FieldType::Text);
    }

    #[test]
    fn test_parse_options_bad_json_is_empty() {
        let props = VariableProps {
            options: "not json".to_string(),
            ..Default::default()
        };
        assert!(props.parse_options().is_empty());
    }

    #[test]
    fn test_parse_options_well_formed() {
        let props = VariableProps {
            options: r#"[{"label": "Yes", "value": "yes"}, {"label": "No", "value": "no"}]"#
                .to_string(),
            ..Default::default()
        };
        let options = props.parse_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Yes");
        assert_eq!(options[1].value, "no");
    }
}
