/*
 * schema.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Form-schema building from extracted variables.

use crate::extract::extract_variables;
use blockdocs_types::{Block, FieldSchema, FormSchema, ValidationRule, VariableProps};

/// Form id used when the caller does not supply one.
pub const DEFAULT_FORM_ID: &str = "generated-form";

/// Convert extracted variables into a [`FormSchema`].
///
/// Unnamed variables are filtered out (they still render as empty
/// placeholders during a merge, but a form cannot key them). Field order is
/// extraction order; duplicate names stay duplicated, which a map-based
/// submission cannot distinguish — see [`blockdocs_types::FormData`].
pub fn variables_to_form_schema(
    variables: Vec<VariableProps>,
    form_id: Option<&str>,
) -> FormSchema {
    let fields = variables
        .into_iter()
        .filter(|v| !v.name.is_empty())
        .map(field_from_variable)
        .collect();

    FormSchema {
        id: form_id.unwrap_or(DEFAULT_FORM_ID).to_string(),
        title: None,
        description: None,
        fields,
        submit_label: None,
    }
}

/// Extract variables and build the schema in one step.
pub fn blocks_to_form_schema(blocks: &[Block], form_id: Option<&str>) -> FormSchema {
    variables_to_form_schema(extract_variables(blocks), form_id)
}

fn field_from_variable(variable: VariableProps) -> FieldSchema {
    let label = if variable.label.is_empty() {
        variable.name.clone()
    } else {
        variable.label.clone()
    };

    let validation = variable.required.then(|| {
        vec![ValidationRule::Required {
            message: format!("{} is required", label),
        }]
    });

    let options = variable
        .field_type
        .has_options()
        .then(|| variable.parse_options());

    FieldSchema {
        name: variable.name,
        field_type: variable.field_type,
        label,
        placeholder: variable.placeholder,
        validation,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdocs_types::FieldType;

    fn variable(name: &str) -> VariableProps {
        VariableProps {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unnamed_variables_are_excluded() {
        let schema = variables_to_form_schema(vec![variable(""), variable("kept")], None);
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name, "kept");
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let schema = variables_to_form_schema(vec![variable("email")], None);
        assert_eq!(schema.fields[0].label, "email");
    }

    #[test]
    fn test_required_rule_message_uses_label_or_name() {
        let schema = variables_to_form_schema(
            vec![VariableProps {
                name: "x".to_string(),
                required: true,
                ..Default::default()
            }],
            None,
        );
        assert_eq!(
            schema.fields[0].validation,
            Some(vec![ValidationRule::Required {
                message: "x is required".to_string()
            }])
        );

        let schema = variables_to_form_schema(
            vec![VariableProps {
                name: "x".to_string(),
                label: "Full name".to_string(),
                required: true,
                ..Default::default()
            }],
            None,
        );
        assert_eq!(
            schema.fields[0].validation,
            Some(vec![ValidationRule::Required {
                message: "Full name is required".to_string()
            }])
        );
    }

    #[test]
    fn test_optional_field_has_no_validation() {
        let schema = variables_to_form_schema(vec![variable("x")], None);
        assert!(schema.fields[0].validation.is_none());
    }

    #[test]
    fn test_select_with_bad_options_json_gets_empty_list() {
        let schema = variables_to_form_schema(
            vec![VariableProps {
                name: "choice".to_string(),
                field_type: FieldType::Select,
                options: "not json".to_string(),
                ..Default::default()
            }],
            None,
        );
        assert_eq!(schema.fields[0].options, Some(vec![]));
    }

    #[test]
    fn test_radio_options_are_parsed() {
        let schema = variables_to_form_schema(
            vec![VariableProps {
                name: "choice".to_string(),
                field_type: FieldType::Radio,
                options: r#"[{"label": "Yes", "value": "yes"}]"#.to_string(),
                ..Default::default()
            }],
            None,
        );
        let options = schema.fields[0].options.as_ref().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Yes");
        assert_eq!(options[0].value, "yes");
    }

    #[test]
    fn test_text_field_carries_no_options() {
        let schema = variables_to_form_schema(vec![variable("x")], None);
        assert!(schema.fields[0].options.is_none());
    }

    #[test]
    fn test_field_order_is_extraction_order() {
        let schema =
            variables_to_form_schema(vec![variable("b"), variable("a"), variable("c")], None);
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_default_form_id() {
        let schema = variables_to_form_schema(vec![], None);
        assert_eq!(schema.id, DEFAULT_FORM_ID);
        let schema = variables_to_form_schema(vec![], Some("template-7"));
        assert_eq!(schema.id, "template-7");
    }
}
