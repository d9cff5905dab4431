/*
 * mod.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! DOCX writer for merged block trees.
//!
//! Builds the `word/document.xml` part with quick-xml's event writer and
//! hands the result to [`package`] for OOXML zip assembly. Dispatch over
//! block kinds is centralized in [`write_block`]; unrecognized kinds fall
//! back to a plain paragraph when they carry content and contribute
//! nothing otherwise.

mod package;
mod parts;

use crate::error::DocxResult;
use blockdocs_types::{
    DocumentOptions, MergedBlock, MergedInline, PageSize, Styles, TextAlignment,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

/// Paragraphs per list level are capped at Word's deepest numbering level.
const MAX_LIST_LEVEL: usize = 8;

// Page dimensions in twentieths of a point.
const A4_TWIPS: (u32, u32) = (11906, 16838);
const LETTER_TWIPS: (u32, u32) = (12240, 15840);

/// Default page margin: one inch.
const DEFAULT_MARGIN_PT: f64 = 72.0;

/// Render merged blocks to a DOCX package.
///
/// The returned bytes are a complete Office Open XML word-processing
/// package; no I/O happens here beyond in-memory assembly.
pub fn render_to_docx(blocks: &[MergedBlock], options: &DocumentOptions) -> DocxResult<Vec<u8>> {
    debug!(blocks = blocks.len(), "rendering DOCX document");

    let mut hyperlinks = HyperlinkTable::new();
    let document = document_part(blocks, options, &mut hyperlinks)?;
    package::pack(&document, &hyperlinks, options)
}

/// Relationship table for external hyperlink targets.
///
/// `word/document.xml` references link targets by relationship id; the ids
/// are handed out here during document assembly and the matching
/// relationship entries are written into `word/_rels/document.xml.rels`
/// afterwards.
pub(crate) struct HyperlinkTable {
    targets: Vec<String>,
}

impl HyperlinkTable {
    // rId1 and rId2 are taken by the styles and numbering parts.
    const FIRST_ID: usize = 3;

    fn new() -> Self {
        HyperlinkTable {
            targets: Vec::new(),
        }
    }

    fn add(&mut self, target: &str) -> String {
        self.targets.push(target.to_string());
        format!("rId{}", Self::FIRST_ID - 1 + self.targets.len())
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, target)| (format!("rId{}", Self::FIRST_ID + i), target.as_str()))
    }
}

fn document_part(
    blocks: &[MergedBlock],
    options: &DocumentOptions,
    hyperlinks: &mut HyperlinkTable,
) -> DocxResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute((
        "xmlns:w",
        "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    ));
    document.push_attribute((
        "xmlns:r",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
    ));
    writer.write_event(Event::Start(document))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        write_block(&mut writer, block, 0, options, hyperlinks)?;
    }

    write_section_properties(&mut writer, options)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

/// Convert one block into document elements.
///
/// `list_level` is the nesting depth threaded through list-item children;
/// it only reaches the output when `options.nested_lists` is set, otherwise
/// every list item renders at level 0.
fn write_block(
    writer: &mut Writer<Vec<u8>>,
    block: &MergedBlock,
    list_level: usize,
    options: &DocumentOptions,
    hyperlinks: &mut HyperlinkTable,
) -> DocxResult<()> {
    use blockdocs_types::BlockKind::*;

    match &block.kind {
        Paragraph => write_paragraph(writer, block, ParagraphKind::Body, hyperlinks),
        Heading => {
            let level = block.heading_level().clamp(1, 6);
            write_paragraph(writer, block, ParagraphKind::Heading(level), hyperlinks)
        }
        BulletListItem | NumberedListItem => {
            let level = if options.nested_lists {
                list_level.min(MAX_LIST_LEVEL)
            } else {
                0
            };
            let numbered = block.kind == NumberedListItem;
            write_paragraph(writer, block, ParagraphKind::ListItem { numbered, level }, hyperlinks)?;
            // Nested list content lives in the item's children.
            for child in block.child_blocks() {
                write_block(writer, child, list_level + 1, options, hyperlinks)?;
            }
            Ok(())
        }
        Table => write_table(writer, block, hyperlinks),
        Other(_) => {
            if block.has_content() {
                write_paragraph(writer, block, ParagraphKind::Body, hyperlinks)
            } else {
                Ok(())
            }
        }
    }
}

enum ParagraphKind {
    Body,
    Heading(u64),
    ListItem { numbered: bool, level: usize },
}

fn write_paragraph(
    writer: &mut Writer<Vec<u8>>,
    block: &MergedBlock,
    kind: ParagraphKind,
    hyperlinks: &mut HyperlinkTable,
) -> DocxResult<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

    match kind {
        ParagraphKind::Body => {}
        ParagraphKind::Heading(level) => {
            let mut style = BytesStart::new("w:pStyle");
            style.push_attribute(("w:val", format!("Heading{}", level).as_str()));
            writer.write_event(Event::Empty(style))?;
        }
        ParagraphKind::ListItem { numbered, level } => {
            writer.write_event(Event::Start(BytesStart::new("w:numPr")))?;
            let mut ilvl = BytesStart::new("w:ilvl");
            ilvl.push_attribute(("w:val", level.to_string().as_str()));
            writer.write_event(Event::Empty(ilvl))?;
            let mut num_id = BytesStart::new("w:numId");
            num_id.push_attribute(("w:val", if numbered { "2" } else { "1" }));
            writer.write_event(Event::Empty(num_id))?;
            writer.write_event(Event::End(BytesEnd::new("w:numPr")))?;
        }
    }

    // List items carry no alignment, matching the editor's semantics.
    if !matches!(kind, ParagraphKind::ListItem { .. }) {
        if let Some(alignment) = block.alignment() {
            let mut jc = BytesStart::new("w:jc");
            jc.push_attribute(("w:val", alignment_value(alignment)));
            writer.write_event(Event::Empty(jc))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    for item in block.inline_content() {
        write_inline(writer, item, hyperlinks)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn alignment_value(alignment: TextAlignment) -> &'static str {
    match alignment {
        TextAlignment::Left => "left",
        TextAlignment::Center => "center",
        TextAlignment::Right => "right",
        TextAlignment::Justify => "both",
    }
}

fn write_inline(
    writer: &mut Writer<Vec<u8>>,
    item: &MergedInline,
    hyperlinks: &mut HyperlinkTable,
) -> DocxResult<()> {
    match item {
        MergedInline::Link {
            text,
            href: Some(href),
            styles,
        } => {
            let rel_id = hyperlinks.add(href);
            let mut hyperlink = BytesStart::new("w:hyperlink");
            hyperlink.push_attribute(("r:id", rel_id.as_str()));
            writer.write_event(Event::Start(hyperlink))?;
            write_run(writer, text, *styles, true)?;
            writer.write_event(Event::End(BytesEnd::new("w:hyperlink")))?;
            Ok(())
        }
        // A link without a target renders as an ordinary styled run.
        MergedInline::Link {
            text,
            href: None,
            styles,
        } => write_run(writer, text, *styles, false),
        MergedInline::Text { text, styles } => write_run(writer, text, *styles, false),
    }
}

fn write_run(
    writer: &mut Writer<Vec<u8>>,
    text: &str,
    styles: Styles,
    hyperlink_style: bool,
) -> DocxResult<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    if hyperlink_style || !styles.is_plain() {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if hyperlink_style {
            let mut style = BytesStart::new("w:rStyle");
            style.push_attribute(("w:val", "Hyperlink"));
            writer.write_event(Event::Empty(style))?;
        }
        if styles.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if styles.italic {
            writer.write_event(Event::Empty(BytesStart::new("w:i")))?;
        }
        if styles.strike {
            writer.write_event(Event::Empty(BytesStart::new("w:strike")))?;
        }
        if styles.underline {
            let mut underline = BytesStart::new("w:u");
            underline.push_attribute(("w:val", "single"));
            writer.write_event(Event::Empty(underline))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    let mut text_el = BytesStart::new("w:t");
    text_el.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text_el))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Tables: each child block is a row, each grandchild a cell wrapping one
/// paragraph. Table width is 100% of the page (5000 fiftieths of a
/// percent).
fn write_table(
    writer: &mut Writer<Vec<u8>>,
    block: &MergedBlock,
    hyperlinks: &mut HyperlinkTable,
) -> DocxResult<()> {
    writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;

    writer.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
    let mut width = BytesStart::new("w:tblW");
    width.push_attribute(("w:w", "5000"));
    width.push_attribute(("w:type", "pct"));
    writer.write_event(Event::Empty(width))?;
    writer.write_event(Event::End(BytesEnd::new("w:tblPr")))?;

    for row in block.child_blocks() {
        writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
        for cell in row.child_blocks() {
            writer.write_event(Event::Start(BytesStart::new("w:tc")))?;
            write_paragraph(writer, cell, ParagraphKind::Body, hyperlinks)?;
            writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
    Ok(())
}

fn write_section_properties(
    writer: &mut Writer<Vec<u8>>,
    options: &DocumentOptions,
) -> DocxResult<()> {
    let (page_w, page_h) = match options.page_size {
        PageSize::A4 => A4_TWIPS,
        PageSize::Letter => LETTER_TWIPS,
    };
    let margins = options.margins.resolved(DEFAULT_MARGIN_PT);

    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

    let mut size = BytesStart::new("w:pgSz");
    size.push_attribute(("w:w", page_w.to_string().as_str()));
    size.push_attribute(("w:h", page_h.to_string().as_str()));
    writer.write_event(Event::Empty(size))?;

    let mut margin = BytesStart::new("w:pgMar");
    margin.push_attribute(("w:top", twips(margins.top).as_str()));
    margin.push_attribute(("w:right", twips(margins.right).as_str()));
    margin.push_attribute(("w:bottom", twips(margins.bottom).as_str()));
    margin.push_attribute(("w:left", twips(margins.left).as_str()));
    margin.push_attribute(("w:header", "708"));
    margin.push_attribute(("w:footer", "708"));
    margin.push_attribute(("w:gutter", "0"));
    writer.write_event(Event::Empty(margin))?;

    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

fn twips(points: f64) -> String {
    ((points * 20.0).round() as i64).to_string()
}
