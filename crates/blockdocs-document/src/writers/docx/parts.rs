/*
 * parts.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! The fixed and near-fixed XML parts of the OOXML package.
//!
//! Everything with interpolated content (core properties, relationship
//! tables, numbering definitions) goes through quick-xml so escaping is
//! handled in one place; fully static parts are plain constants.

use super::HyperlinkTable;
use crate::error::DocxResult;
use blockdocs_types::DocumentOptions;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub(super) const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

pub(super) const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

pub(super) const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
<Application>blockdocs</Application>
</Properties>"#;

/// `docProps/core.xml`: document title and creator from the options.
pub(super) fn core_props(options: &DocumentOptions) -> DocxResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute((
        "xmlns:cp",
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
    ));
    root.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
    writer.write_event(Event::Start(root))?;

    if let Some(title) = &options.title {
        writer.write_event(Event::Start(BytesStart::new("dc:title")))?;
        writer.write_event(Event::Text(BytesText::new(title)))?;
        writer.write_event(Event::End(BytesEnd::new("dc:title")))?;
    }
    if let Some(author) = &options.author {
        writer.write_event(Event::Start(BytesStart::new("dc:creator")))?;
        writer.write_event(Event::Text(BytesText::new(author)))?;
        writer.write_event(Event::End(BytesEnd::new("dc:creator")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(writer.into_inner())
}

/// `word/_rels/document.xml.rels`: styles, numbering, and one external
/// relationship per hyperlink target handed out during document assembly.
pub(super) fn document_rels(hyperlinks: &HyperlinkTable) -> DocxResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("Relationships");
    root.push_attribute(("xmlns", REL_NS));
    writer.write_event(Event::Start(root))?;

    write_relationship(
        &mut writer,
        "rId1",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
        "styles.xml",
        false,
    )?;
    write_relationship(
        &mut writer,
        "rId2",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering",
        "numbering.xml",
        false,
    )?;
    for (id, target) in hyperlinks.entries() {
        write_relationship(
            &mut writer,
            &id,
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink",
            target,
            true,
        )?;
    }

    writer.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(writer.into_inner())
}

fn write_relationship(
    writer: &mut Writer<Vec<u8>>,
    id: &str,
    rel_type: &str,
    target: &str,
    external: bool,
) -> DocxResult<()> {
    let mut rel = BytesStart::new("Relationship");
    rel.push_attribute(("Id", id));
    rel.push_attribute(("Type", rel_type));
    rel.push_attribute(("Target", target));
    if external {
        rel.push_attribute(("TargetMode", "External"));
    }
    writer.write_event(Event::Empty(rel))?;
    Ok(())
}

/// `word/styles.xml`: Normal, Heading1-6, and the Hyperlink character
/// style referenced by link runs.
pub(super) fn styles() -> DocxResult<Vec<u8>> {
    // Half-point sizes per heading level 1..=6.
    const HEADING_SIZES: [u32; 6] = [32, 28, 26, 24, 22, 20];

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:styles");
    root.push_attribute(("xmlns:w", WORD_NS));
    writer.write_event(Event::Start(root))?;

    // Normal
    let mut normal = BytesStart::new("w:style");
    normal.push_attribute(("w:type", "paragraph"));
    normal.push_attribute(("w:styleId", "Normal"));
    normal.push_attribute(("w:default", "1"));
    writer.write_event(Event::Start(normal))?;
    write_style_name(&mut writer, "Normal")?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    for (index, size) in HEADING_SIZES.iter().enumerate() {
        let level = index + 1;
        let mut style = BytesStart::new("w:style");
        style.push_attribute(("w:type", "paragraph"));
        style.push_attribute(("w:styleId", format!("Heading{}", level).as_str()));
        writer.write_event(Event::Start(style))?;
        write_style_name(&mut writer, &format!("heading {}", level))?;

        let mut based_on = BytesStart::new("w:basedOn");
        based_on.push_attribute(("w:val", "Normal"));
        writer.write_event(Event::Empty(based_on))?;

        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        let mut outline = BytesStart::new("w:outlineLvl");
        outline.push_attribute(("w:val", index.to_string().as_str()));
        writer.write_event(Event::Empty(outline))?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        let mut sz = BytesStart::new("w:sz");
        sz.push_attribute(("w:val", size.to_string().as_str()));
        writer.write_event(Event::Empty(sz))?;
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

        writer.write_event(Event::End(BytesEnd::new("w:style")))?;
    }

    // Hyperlink character style
    let mut hyperlink = BytesStart::new("w:style");
    hyperlink.push_attribute(("w:type", "character"));
    hyperlink.push_attribute(("w:styleId", "Hyperlink"));
    writer.write_event(Event::Start(hyperlink))?;
    write_style_name(&mut writer, "Hyperlink")?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    let mut color = BytesStart::new("w:color");
    color.push_attribute(("w:val", "0563C1"));
    writer.write_event(Event::Empty(color))?;
    let mut underline = BytesStart::new("w:u");
    underline.push_attribute(("w:val", "single"));
    writer.write_event(Event::Empty(underline))?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    writer.write_event(Event::End(BytesEnd::new("w:styles")))?;
    Ok(writer.into_inner())
}

fn write_style_name(writer: &mut Writer<Vec<u8>>, name: &str) -> DocxResult<()> {
    let mut el = BytesStart::new("w:name");
    el.push_attribute(("w:val", name));
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

/// `word/numbering.xml`: a bullet numbering (numId 1) and a decimal
/// numbering (numId 2), each defined for all nine levels so depth-tracked
/// list nesting has somewhere to go.
pub(super) fn numbering() -> DocxResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:numbering");
    root.push_attribute(("xmlns:w", WORD_NS));
    writer.write_event(Event::Start(root))?;

    write_abstract_num(&mut writer, 0, true)?;
    write_abstract_num(&mut writer, 1, false)?;

    for (num_id, abstract_id) in [(1, 0), (2, 1)] {
        let mut num = BytesStart::new("w:num");
        num.push_attribute(("w:numId", num_id.to_string().as_str()));
        writer.write_event(Event::Start(num))?;
        let mut abs = BytesStart::new("w:abstractNumId");
        abs.push_attribute(("w:val", abstract_id.to_string().as_str()));
        writer.write_event(Event::Empty(abs))?;
        writer.write_event(Event::End(BytesEnd::new("w:num")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:numbering")))?;
    Ok(writer.into_inner())
}

fn write_abstract_num(
    writer: &mut Writer<Vec<u8>>,
    abstract_id: u32,
    bullet: bool,
) -> DocxResult<()> {
    let mut abstract_num = BytesStart::new("w:abstractNum");
    abstract_num.push_attribute(("w:abstractNumId", abstract_id.to_string().as_str()));
    writer.write_event(Event::Start(abstract_num))?;

    for level in 0u32..9 {
        let mut lvl = BytesStart::new("w:lvl");
        lvl.push_attribute(("w:ilvl", level.to_string().as_str()));
        writer.write_event(Event::Start(lvl))?;

        let mut start = BytesStart::new("w:start");
        start.push_attribute(("w:val", "1"));
        writer.write_event(Event::Empty(start))?;

        let mut fmt = BytesStart::new("w:numFmt");
        fmt.push_attribute(("w:val", if bullet { "bullet" } else { "decimal" }));
        writer.write_event(Event::Empty(fmt))?;

        let text = if bullet {
            "\u{2022}".to_string()
        } else {
            format!("%{}.", level + 1)
        };
        let mut lvl_text = BytesStart::new("w:lvlText");
        lvl_text.push_attribute(("w:val", text.as_str()));
        writer.write_event(Event::Empty(lvl_text))?;

        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        let mut ind = BytesStart::new("w:ind");
        ind.push_attribute(("w:left", (720 * (level + 1)).to_string().as_str()));
        ind.push_attribute(("w:hanging", "360"));
        writer.write_event(Event::Empty(ind))?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

        writer.write_event(Event::End(BytesEnd::new("w:lvl")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:abstractNum")))?;
    Ok(())
}
