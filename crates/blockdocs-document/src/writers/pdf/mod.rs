/*
 * mod.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! PDF writer for merged block trees.
//!
//! Two stages, mirroring the DOCX writer's shape: [`build_nodes`] dispatches
//! block kinds into a page-description content model, then the layout
//! engine paginates that model into per-page content streams which are
//! assembled into the final file with `pdf-writer`. Text is set in the
//! viewer-built-in Helvetica family; only its metrics live here (see
//! [`metrics`]), never the font program itself.

mod layout;
mod metrics;

use crate::error::PdfResult;
use blockdocs_types::{DocumentOptions, MergedBlock, PageSize, Styles, TextAlignment};
use layout::LayoutEngine;
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

/// Body text size in points.
const BODY_SIZE: f64 = 12.0;
/// Line height multiplier applied document-wide.
const LINE_HEIGHT: f64 = 1.4;
/// Default page margin in points.
const DEFAULT_MARGIN_PT: f64 = 40.0;

// Page dimensions in points.
const A4_PT: (f64, f64) = (595.28, 841.89);
const LETTER_PT: (f64, f64) = (612.0, 792.0);

/// Render merged blocks to a PDF file.
///
/// Fails only when the page geometry is unusable (margins consuming the
/// whole page); malformed trees degrade the same way they do everywhere
/// else in the pipeline.
pub fn render_to_pdf(blocks: &[MergedBlock], options: &DocumentOptions) -> PdfResult<Vec<u8>> {
    debug!(blocks = blocks.len(), "rendering PDF document");

    let nodes = build_nodes(blocks);

    let (page_w, page_h) = match options.page_size {
        PageSize::A4 => A4_PT,
        PageSize::Letter => LETTER_PT,
    };
    let margins = options.margins.resolved(DEFAULT_MARGIN_PT);
    let engine = LayoutEngine::new(page_w, page_h, margins, options.nested_lists)?;
    let pages = engine.render(&nodes);

    Ok(assemble(pages, page_w, page_h, options))
}

// =============================================================================
// Content model
// =============================================================================

/// Named paragraph styles, taken from the default style palette: three
/// heading sizes (deeper levels collapse to the third) and body text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub space_after: f64,
}

pub(super) const STYLE_BODY: TextStyle = TextStyle {
    size: BODY_SIZE,
    bold: false,
    space_after: 8.0,
};

const STYLE_HEADINGS: [TextStyle; 3] = [
    TextStyle { size: 24.0, bold: true, space_after: 10.0 },
    TextStyle { size: 20.0, bold: true, space_after: 8.0 },
    TextStyle { size: 16.0, bold: true, space_after: 6.0 },
];

/// Space left under a list or table.
const BLOCK_SPACING: f64 = 8.0;

/// One styled run of text in the content model.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Segment {
    pub text: String,
    pub styles: Styles,
    pub link: Option<String>,
}

/// One item of a list node; nested content hangs off `children`.
#[derive(Debug, PartialEq)]
pub(super) struct ListItem {
    pub segments: Vec<Segment>,
    pub children: Vec<PdfNode>,
}

/// The page-description content tree the layout engine consumes.
#[derive(Debug, PartialEq)]
pub(super) enum PdfNode {
    Text {
        segments: Vec<Segment>,
        style: TextStyle,
        alignment: Option<TextAlignment>,
    },
    List {
        numbered: bool,
        items: Vec<ListItem>,
    },
    /// Rows of cells of segments; the first row is the header row.
    Table { rows: Vec<Vec<Vec<Segment>>> },
}

/// Dispatch merged blocks into content nodes.
///
/// Consecutive list items of the same kind accumulate into a single list
/// node; everything else maps one block to at most one node. Unrecognized
/// kinds become a body paragraph when they carry content and nothing
/// otherwise.
pub(super) fn build_nodes(blocks: &[MergedBlock]) -> Vec<PdfNode> {
    use blockdocs_types::BlockKind::*;

    let mut nodes = Vec::new();
    let mut index = 0;

    while index < blocks.len() {
        let block = &blocks[index];
        match &block.kind {
            Paragraph => {
                nodes.push(PdfNode::Text {
                    segments: segments_of(block),
                    style: STYLE_BODY,
                    alignment: block.alignment(),
                });
                index += 1;
            }
            Heading => {
                let level = block.heading_level().clamp(1, 6) as usize;
                let style = STYLE_HEADINGS[level.min(3) - 1];
                nodes.push(PdfNode::Text {
                    segments: segments_of(block),
                    style,
                    alignment: block.alignment(),
                });
                index += 1;
            }
            BulletListItem | NumberedListItem => {
                let kind = block.kind.clone();
                let mut items = Vec::new();
                while index < blocks.len() && blocks[index].kind == kind {
                    let item = &blocks[index];
                    items.push(ListItem {
                        segments: segments_of(item),
                        children: build_nodes(item.child_blocks()),
                    });
                    index += 1;
                }
                nodes.push(PdfNode::List {
                    numbered: kind == NumberedListItem,
                    items,
                });
            }
            Table => {
                let rows = block
                    .child_blocks()
                    .iter()
                    .map(|row| {
                        row.child_blocks()
                            .iter()
                            .map(|cell| segments_of(cell))
                            .collect()
                    })
                    .collect();
                nodes.push(PdfNode::Table { rows });
                index += 1;
            }
            Other(_) => {
                if block.has_content() {
                    nodes.push(PdfNode::Text {
                        segments: segments_of(block),
                        style: STYLE_BODY,
                        alignment: block.alignment(),
                    });
                }
                index += 1;
            }
        }
    }

    nodes
}

fn segments_of(block: &MergedBlock) -> Vec<Segment> {
    block
        .inline_content()
        .iter()
        .map(|item| Segment {
            text: item.text().to_string(),
            styles: item.styles(),
            link: item.href().map(str::to_string),
        })
        .collect()
}

// =============================================================================
// File assembly
// =============================================================================

fn assemble(
    pages: Vec<layout::PageOutput>,
    page_w: f64,
    page_h: f64,
    options: &DocumentOptions,
) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let font_ids: [Ref; 4] = std::array::from_fn(|_| alloc.bump());
    let info_id = alloc.bump();

    struct PagePlan {
        page_id: Ref,
        content_id: Ref,
        annot_ids: Vec<Ref>,
        output: layout::PageOutput,
    }

    let plans: Vec<PagePlan> = pages
        .into_iter()
        .map(|output| PagePlan {
            page_id: alloc.bump(),
            content_id: alloc.bump(),
            annot_ids: output.links.iter().map(|_| alloc.bump()).collect(),
            output,
        })
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(plans.iter().map(|p| p.page_id))
        .count(plans.len() as i32);

    for plan in plans {
        let mut page = pdf.page(plan.page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w as f32, page_h as f32));
        page.parent(tree_id);
        page.contents(plan.content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (index, font_id) in font_ids.iter().enumerate() {
                fonts.pair(Name(font_name(index).as_bytes()), *font_id);
            }
        }
        if !plan.annot_ids.is_empty() {
            page.annotations(plan.annot_ids.iter().copied());
        }
        page.finish();

        pdf.stream(plan.content_id, &plan.output.content.finish());

        for (annot_id, link) in plan.annot_ids.iter().zip(&plan.output.links) {
            let mut annot = pdf.annotation(*annot_id);
            annot.subtype(AnnotationType::Link);
            annot.rect(Rect::new(link.x1, link.y1, link.x2, link.y2));
            annot
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(link.uri.as_bytes()));
            annot.finish();
        }
    }

    const BASE_FONTS: [&str; 4] = [
        "Helvetica",
        "Helvetica-Bold",
        "Helvetica-Oblique",
        "Helvetica-BoldOblique",
    ];
    for (font_id, base) in font_ids.iter().zip(BASE_FONTS) {
        pdf.type1_font(*font_id)
            .base_font(Name(base.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut info = pdf.document_info(info_id);
    if let Some(title) = &options.title {
        info.title(TextStr(title));
    }
    if let Some(author) = &options.author {
        info.author(TextStr(author));
    }
    info.finish();

    pdf.finish()
}

/// Resource name for a font selected by (bold, italic) flags.
pub(super) fn font_name(index: usize) -> &'static str {
    ["F1", "F2", "F3", "F4"][index]
}

/// Font slot for a style: regular, bold, oblique, bold-oblique.
pub(super) fn font_index(bold: bool, italic: bool) -> usize {
    match (bold, italic) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}
