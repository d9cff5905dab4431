/*
 * pipeline.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! End-to-end pipeline tests: an editor-shaped JSON template goes through
//! schema generation, merging, and both document writers.

use blockdocs_document::{merge_template, DocumentOptions};
use blockdocs_document::writers::{docx::render_to_docx, pdf::render_to_pdf};
use blockdocs_template::blocks_to_form_schema;
use blockdocs_types::{Block, FieldType, FormData};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// A template close to what the editor actually emits: heading, paragraph
/// with variables and a link, a bullet list, and a table.
fn offer_letter_template() -> Vec<Block> {
    serde_json::from_str(
        r#"[
            {
                "id": "h1",
                "type": "heading",
                "props": {"level": 1},
                "content": [{"type": "text", "text": "Offer of Employment"}]
            },
            {
                "id": "p1",
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "Dear "},
                    {
                        "type": "variable",
                        "props": {
                            "name": "candidate",
                            "label": "Candidate name",
                            "required": true
                        }
                    },
                    {"type": "text", "text": ", welcome to "},
                    {
                        "type": "link",
                        "text": "Initech",
                        "props": {"href": "https://initech.example"}
                    },
                    {"type": "text", "text": "."}
                ]
            },
            {
                "id": "p2",
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "Your starting salary is "},
                    {
                        "type": "variable",
                        "props": {
                            "name": "salary",
                            "fieldType": "number",
                            "placeholder": "90000"
                        }
                    },
                    {"type": "text", "text": " per year."}
                ]
            },
            {
                "id": "l1",
                "type": "bulletListItem",
                "content": [{"type": "text", "text": "Health insurance"}]
            },
            {
                "id": "l2",
                "type": "bulletListItem",
                "content": [{"type": "text", "text": "Annual leave"}]
            },
            {
                "id": "t1",
                "type": "table",
                "children": [
                    {
                        "type": "tableRow",
                        "children": [
                            {"type": "tableCell", "content": [{"type": "text", "text": "Item"}]},
                            {"type": "tableCell", "content": [{"type": "text", "text": "Date"}]}
                        ]
                    },
                    {
                        "type": "tableRow",
                        "children": [
                            {"type": "tableCell", "content": [{"type": "text", "text": "Start"}]},
                            {
                                "type": "tableCell",
                                "content": [{
                                    "type": "variable",
                                    "props": {"name": "start_date", "label": "Start date"}
                                }]
                            }
                        ]
                    }
                ]
            }
        ]"#,
    )
    .unwrap()
}

fn submission() -> FormData {
    [
        ("candidate", "Ada Lovelace"),
        ("salary", "90,000 USD"),
        ("start_date", "2026-01-05"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut part = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut part).unwrap();
    part
}

#[test]
fn test_schema_reflects_template_variables() {
    let schema = blocks_to_form_schema(&offer_letter_template(), Some("offer-letter"));

    assert_eq!(schema.id, "offer-letter");
    let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["candidate", "salary", "start_date"]);

    let candidate = &schema.fields[0];
    assert_eq!(candidate.label, "Candidate name");
    assert!(candidate.validation.is_some());

    let salary = &schema.fields[1];
    assert_eq!(salary.field_type, FieldType::Number);
    assert_eq!(salary.placeholder, "90000");
    assert!(salary.validation.is_none());
}

#[test]
fn test_merged_docx_contains_submitted_values() {
    let merged = merge_template(&offer_letter_template(), &submission());
    let bytes = render_to_docx(&merged, &DocumentOptions::default()).unwrap();

    assert_eq!(&bytes[..2], b"PK");
    let document = docx_part(&bytes, "word/document.xml");
    assert!(document.contains("Ada Lovelace"));
    assert!(document.contains("90,000 USD"));
    assert!(document.contains("2026-01-05"));
    assert!(document.contains("Offer of Employment"));
    // The link run references a relationship; the URL itself lives in the
    // rels part.
    assert!(document.contains("w:hyperlink"));
    assert!(!document.contains("https://initech.example"));
    let rels = docx_part(&bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains("https://initech.example"));
}

#[test]
fn test_unanswered_variable_leaves_no_trace() {
    let mut data = submission();
    data.remove("salary");
    let merged = merge_template(&offer_letter_template(), &data);
    let document = docx_part(
        &render_to_docx(&merged, &DocumentOptions::default()).unwrap(),
        "word/document.xml",
    );

    // The surrounding text survives; neither the value nor the field's
    // placeholder is left where the variable stood.
    assert!(document.contains("Your starting salary is "));
    assert!(document.contains(" per year."));
    assert!(!document.contains("90,000 USD"));
    assert!(!document.contains("90000"));
}

#[test]
fn test_merged_pdf_renders() {
    let merged = merge_template(&offer_letter_template(), &submission());
    let bytes = render_to_pdf(&merged, &DocumentOptions::default()).unwrap();

    assert_eq!(&bytes[..5], b"%PDF-");
    // Helvetica resources and a link annotation made it into the file.
    let text = String::from_utf8_lossy(&bytes).to_string();
    assert!(text.contains("Helvetica"));
    assert!(text.contains("https://initech.example"));
    // Substituted values are painted exactly once.
    assert_eq!(text.matches("Lovelace").count(), 1);
}

#[test]
fn test_document_metadata_round_trips_to_docx() {
    let options = DocumentOptions {
        title: Some("Offer letter".to_string()),
        author: Some("People Ops".to_string()),
        ..Default::default()
    };
    let merged = merge_template(&offer_letter_template(), &submission());
    let core = docx_part(
        &render_to_docx(&merged, &options).unwrap(),
        "docProps/core.xml",
    );
    assert!(core.contains("Offer letter"));
    assert!(core.contains("People Ops"));
}

#[test]
fn test_empty_template_still_produces_valid_documents() {
    let merged = merge_template(&[], &FormData::new());
    let docx = render_to_docx(&merged, &DocumentOptions::default()).unwrap();
    let pdf = render_to_pdf(&merged, &DocumentOptions::default()).unwrap();
    assert_eq!(&docx[..2], b"PK");
    assert_eq!(&pdf[..5], b"%PDF-");
}
