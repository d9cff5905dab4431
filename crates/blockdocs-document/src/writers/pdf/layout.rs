/*
 * layout.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Paginating layout for the PDF content model.
//!
//! Greedy word-wrap over styled segments, a top-down cursor per page, and
//! page breaks whenever a line (or table row) no longer fits above the
//! bottom margin. Output is one content stream per page plus the link
//! rectangles that become URI annotations.

use super::metrics::text_width;
use super::{
    font_index, font_name, ListItem, PdfNode, Segment, TextStyle, BLOCK_SPACING, LINE_HEIGHT,
    STYLE_BODY,
};
use crate::error::{PdfError, PdfResult};
use blockdocs_types::{ResolvedMargins, Styles, TextAlignment};
use pdf_writer::{Content, Str};

/// Indent step for list markers and nested content.
const LIST_INDENT: f64 = 18.0;
/// Inner padding of a table cell.
const CELL_PADDING: f64 = 3.0;
/// Hairline width for underlines, strikes, and table rules.
const RULE_WIDTH: f32 = 0.5;
/// Link color (#0066cc).
const LINK_RGB: (f32, f32, f32) = (0.0, 0.4, 0.8);

/// A laid-out page: its content stream and any link hotspots on it.
pub(super) struct PageOutput {
    pub content: Content,
    pub links: Vec<LinkRect>,
}

/// Rectangle (PDF user-space coordinates) that activates a URI.
pub(super) struct LinkRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub uri: String,
}

pub(super) struct LayoutEngine {
    page_h: f64,
    margins: ResolvedMargins,
    content_w: f64,
    nested_lists: bool,
    /// Top of the unwritten area on the current page.
    cursor: f64,
    current: PageOutput,
    finished: Vec<PageOutput>,
}

impl LayoutEngine {
    pub fn new(
        page_w: f64,
        page_h: f64,
        margins: ResolvedMargins,
        nested_lists: bool,
    ) -> PdfResult<Self> {
        let content_w = page_w - margins.left - margins.right;
        let content_h = page_h - margins.top - margins.bottom;
        if content_w <= 0.0 || content_h <= 0.0 {
            return Err(PdfError::InvalidGeometry(format!(
                "{}x{}pt page with margins {}/{}/{}/{}pt leaves no content area",
                page_w, page_h, margins.top, margins.right, margins.bottom, margins.left,
            )));
        }

        Ok(LayoutEngine {
            page_h,
            margins,
            content_w,
            nested_lists,
            cursor: page_h - margins.top,
            current: PageOutput {
                content: Content::new(),
                links: Vec::new(),
            },
            finished: Vec::new(),
        })
    }

    pub fn render(mut self, nodes: &[PdfNode]) -> Vec<PageOutput> {
        for node in nodes {
            self.render_node(node, 0.0);
        }
        self.finished.push(self.current);
        self.finished
    }

    fn render_node(&mut self, node: &PdfNode, indent: f64) {
        match node {
            PdfNode::Text {
                segments,
                style,
                alignment,
            } => {
                self.render_text(segments, *style, *alignment, indent, None);
                self.cursor -= style.space_after;
            }
            PdfNode::List { numbered, items } => {
                self.render_list(*numbered, items, indent);
                self.cursor -= BLOCK_SPACING;
            }
            PdfNode::Table { rows } => {
                self.render_table(rows, indent);
                self.cursor -= BLOCK_SPACING;
            }
        }
    }

    fn render_list(&mut self, numbered: bool, items: &[ListItem], indent: f64) {
        let text_indent = indent + LIST_INDENT;
        for (index, item) in items.iter().enumerate() {
            let marker = if numbered {
                format!("{}.", index + 1)
            } else {
                "\u{2022}".to_string()
            };
            let item_style = TextStyle {
                space_after: 0.0,
                ..STYLE_BODY
            };
            self.render_text(
                &item.segments,
                item_style,
                None,
                text_indent,
                Some((marker, indent)),
            );
            // Nested content is indented one step further only when depth
            // tracking is on; the default keeps everything at one level.
            let child_indent = if self.nested_lists { text_indent } else { indent };
            for child in &item.children {
                self.render_node(child, child_indent);
            }
        }
    }

    /// Lay out one run of segments as wrapped lines.
    ///
    /// `marker` is a list bullet/number drawn at its own indent on the
    /// first line, outside the wrapped text column.
    fn render_text(
        &mut self,
        segments: &[Segment],
        style: TextStyle,
        alignment: Option<TextAlignment>,
        indent: f64,
        marker: Option<(String, f64)>,
    ) {
        let avail = (self.content_w - indent).max(1.0);
        let lines = wrap(segments, style, avail);
        let line_h = style.size * LINE_HEIGHT;
        let x0 = self.margins.left + indent;
        let mut marker = marker;

        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.into_iter().enumerate() {
            self.ensure_room(line_h);
            let baseline = self.cursor - style.size;

            if let Some((text, marker_indent)) = marker.take() {
                self.emit_piece(
                    &text,
                    Default::default(),
                    None,
                    self.margins.left + marker_indent,
                    baseline,
                    style,
                );
            }

            let x = match alignment {
                Some(TextAlignment::Center) => x0 + (avail - line.width) / 2.0,
                Some(TextAlignment::Right) => x0 + (avail - line.width),
                _ => x0,
            };
            let word_extra = match alignment {
                Some(TextAlignment::Justify) if index != last && line.spaces > 0 => {
                    (avail - line.width) / line.spaces as f64
                }
                _ => 0.0,
            };

            self.emit_line(&line, segments, x, baseline, style, word_extra);
            self.cursor -= line_h;
        }
    }

    /// Draw one line: pieces in reading order, decorations afterwards.
    fn emit_line(
        &mut self,
        line: &Line,
        segments: &[Segment],
        x: f64,
        baseline: f64,
        style: TextStyle,
        word_extra: f64,
    ) {
        let space_w = text_width(" ", style.size, false) + word_extra;
        let mut cursor_x = x;

        for (word_index, word) in line.words.iter().enumerate() {
            if word_index > 0 {
                cursor_x += space_w;
            }
            for piece in &word.pieces {
                let segment = &segments[piece.segment];
                let piece_w = self.emit_piece(
                    &piece.text,
                    segment.styles,
                    segment.link.as_deref(),
                    cursor_x,
                    baseline,
                    style,
                );
                cursor_x += piece_w;
            }
        }
        debug_assert!(cursor_x - x <= self.content_w + 1.0 || line.words.len() <= 1);
    }

    /// Show one piece of text and its decorations; returns its width.
    fn emit_piece(
        &mut self,
        text: &str,
        styles: Styles,
        link: Option<&str>,
        x: f64,
        baseline: f64,
        style: TextStyle,
    ) -> f64 {
        let bold = style.bold || styles.bold;
        let italic = styles.italic;
        let size = style.size;
        let width = text_width(text, size, bold);
        let is_link = link.is_some();

        let content = &mut self.current.content;
        content.begin_text();
        content.set_font(
            pdf_writer::Name(font_name(font_index(bold, italic)).as_bytes()),
            size as f32,
        );
        if is_link {
            content.set_fill_rgb(LINK_RGB.0, LINK_RGB.1, LINK_RGB.2);
        } else {
            content.set_fill_rgb(0.0, 0.0, 0.0);
        }
        content.next_line(x as f32, baseline as f32);
        content.show(Str(&winansi(text)));
        content.end_text();

        // Links render underlined in the link color; explicit underline and
        // strike styles draw their own rules.
        if styles.underline || is_link {
            let rgb = if is_link { LINK_RGB } else { (0.0, 0.0, 0.0) };
            self.draw_rule(x, baseline - 1.5, width, rgb);
        }
        if styles.strike {
            self.draw_rule(x, baseline + size * 0.3, width, (0.0, 0.0, 0.0));
        }

        if let Some(uri) = link {
            self.current.links.push(LinkRect {
                x1: x as f32,
                y1: (baseline - 2.0) as f32,
                x2: (x + width) as f32,
                y2: (baseline + size) as f32,
                uri: uri.to_string(),
            });
        }

        width
    }

    fn draw_rule(&mut self, x: f64, y: f64, width: f64, rgb: (f32, f32, f32)) {
        let content = &mut self.current.content;
        content.set_stroke_rgb(rgb.0, rgb.1, rgb.2);
        content.set_line_width(RULE_WIDTH);
        content.move_to(x as f32, y as f32);
        content.line_to((x + width) as f32, y as f32);
        content.stroke();
    }

    fn render_table(&mut self, rows: &[Vec<Vec<Segment>>], indent: f64) {
        let Some(first_row) = rows.first() else {
            return;
        };
        let columns = first_row.len();
        if columns == 0 {
            return;
        }

        let table_w = (self.content_w - indent).max(1.0);
        let col_w = table_w / columns as f64;
        let cell_text_w = (col_w - 2.0 * CELL_PADDING).max(1.0);
        let line_h = STYLE_BODY.size * LINE_HEIGHT;
        let x0 = self.margins.left + indent;

        for (row_index, row) in rows.iter().enumerate() {
            // The first row is the header row and renders bold.
            let cell_style = TextStyle {
                bold: row_index == 0,
                space_after: 0.0,
                ..STYLE_BODY
            };
            let wrapped: Vec<Vec<Line>> = row
                .iter()
                .map(|cell| wrap(cell, cell_style, cell_text_w))
                .collect();
            let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            let row_h = row_lines as f64 * line_h + 2.0 * CELL_PADDING;

            self.ensure_room(row_h);
            let top = self.cursor;

            for (cell_index, lines) in wrapped.iter().enumerate() {
                let cell_x = x0 + cell_index as f64 * col_w + CELL_PADDING;
                let mut baseline = top - CELL_PADDING - cell_style.size;
                let cell_segments = &row[cell_index];
                for line in lines {
                    self.emit_line(line, cell_segments, cell_x, baseline, cell_style, 0.0);
                    baseline -= line_h;
                }
            }

            // Grid rules: top edge on the first row, bottom edge of every
            // row, verticals spanning the row.
            if row_index == 0 {
                self.draw_rule(x0, top, col_w * columns as f64, (0.0, 0.0, 0.0));
            }
            self.draw_rule(x0, top - row_h, col_w * columns as f64, (0.0, 0.0, 0.0));
            for boundary in 0..=columns {
                let x = x0 + boundary as f64 * col_w;
                let content = &mut self.current.content;
                content.set_stroke_rgb(0.0, 0.0, 0.0);
                content.set_line_width(RULE_WIDTH);
                content.move_to(x as f32, top as f32);
                content.line_to(x as f32, (top - row_h) as f32);
                content.stroke();
            }

            self.cursor -= row_h;
        }
    }

    /// Break the page if `needed` points no longer fit. A fresh page always
    /// accepts the content, even if it is taller than the page itself.
    fn ensure_room(&mut self, needed: f64) {
        let page_top = self.page_h - self.margins.top;
        if self.cursor - needed < self.margins.bottom && self.cursor < page_top {
            let previous = std::mem::replace(
                &mut self.current,
                PageOutput {
                    content: Content::new(),
                    links: Vec::new(),
                },
            );
            self.finished.push(previous);
            self.cursor = page_top;
        }
    }
}

// =============================================================================
// Word wrapping
// =============================================================================

struct Piece {
    segment: usize,
    text: String,
}

struct Word {
    pieces: Vec<Piece>,
    width: f64,
}

struct Line {
    words: Vec<Word>,
    width: f64,
    /// Inter-word gaps on this line, for justification.
    spaces: usize,
}

fn piece_width(piece: &Piece, segments: &[Segment], style: TextStyle) -> f64 {
    let bold = style.bold || segments[piece.segment].styles.bold;
    text_width(&piece.text, style.size, bold)
}

/// Split segments into unbreakable words. A word may span segment
/// boundaries when no whitespace separates them.
fn words(segments: &[Segment], style: TextStyle) -> Vec<Word> {
    let mut result: Vec<Word> = Vec::new();
    let mut open = false;

    for (segment_index, segment) in segments.iter().enumerate() {
        for (index, chunk) in segment.text.split_whitespace().enumerate() {
            let starts_fresh = index > 0 || !open || segment.text.starts_with(char::is_whitespace);
            let piece = Piece {
                segment: segment_index,
                text: chunk.to_string(),
            };
            let piece_w = piece_width(&piece, segments, style);
            match result.last_mut() {
                Some(last) if !starts_fresh => {
                    last.pieces.push(piece);
                    last.width += piece_w;
                }
                _ => result.push(Word {
                    pieces: vec![piece],
                    width: piece_w,
                }),
            }
            open = true;
        }
        if segment.text.ends_with(char::is_whitespace) || segment.text.is_empty() {
            open = false;
        }
    }

    result
}

/// Greedy fill: words go onto a line until the next one no longer fits.
fn wrap(segments: &[Segment], style: TextStyle, avail: f64) -> Vec<Line> {
    let space_w = text_width(" ", style.size, false);
    let mut lines = Vec::new();
    let mut current = Line {
        words: Vec::new(),
        width: 0.0,
        spaces: 0,
    };

    for word in words(segments, style) {
        let added = if current.words.is_empty() {
            word.width
        } else {
            space_w + word.width
        };
        if !current.words.is_empty() && current.width + added > avail {
            lines.push(current);
            current = Line {
                width: word.width,
                words: vec![word],
                spaces: 0,
            };
        } else {
            current.width += added;
            if !current.words.is_empty() {
                current.spaces += 1;
            }
            current.words.push(word);
        }
    }
    lines.push(current);
    lines
}

/// Encode text for a WinAnsi simple font. Codepoints outside the encoding
/// degrade to `?`.
fn winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u8,
            _ => match c {
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2026}' => 0x85,
                '\u{20AC}' => 0x80,
                _ => b'?',
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margins() -> ResolvedMargins {
        ResolvedMargins {
            top: 40.0,
            bottom: 40.0,
            left: 40.0,
            right: 40.0,
        }
    }

    fn segment(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            styles: Styles::default(),
            link: None,
        }
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(595.28, 841.89, margins(), false).unwrap()
    }

    #[test]
    fn test_geometry_validation() {
        let bad = ResolvedMargins {
            top: 40.0,
            bottom: 40.0,
            left: 300.0,
            right: 300.0,
        };
        assert!(LayoutEngine::new(595.28, 841.89, bad, false).is_err());
        assert!(LayoutEngine::new(595.28, 841.89, margins(), false).is_ok());
    }

    #[test]
    fn test_short_text_fits_one_line() {
        let lines = wrap(&[segment("hello world")], STYLE_BODY, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words.len(), 2);
        assert_eq!(lines[0].spaces, 1);
    }

    #[test]
    fn test_wrap_breaks_at_width() {
        let text = "aaaa ".repeat(40);
        let lines = wrap(&[segment(&text)], STYLE_BODY, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 100.0);
        }
    }

    #[test]
    fn test_word_spanning_segments_stays_unbroken() {
        let segments = [segment("un"), segment("breakable word")];
        let words = words(&segments, STYLE_BODY);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].pieces.len(), 2);
        assert_eq!(words[0].pieces[0].text, "un");
        assert_eq!(words[0].pieces[1].text, "breakable");
    }

    #[test]
    fn test_empty_segments_produce_one_empty_line() {
        let lines = wrap(&[], STYLE_BODY, 500.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].words.is_empty());
    }

    #[test]
    fn test_long_document_paginates() {
        let mut engine = engine();
        let node = PdfNode::Text {
            segments: vec![segment("paragraph text")],
            style: STYLE_BODY,
            alignment: None,
        };
        for _ in 0..100 {
            engine.render_node(&node, 0.0);
        }
        let pages = engine.render(&[]);
        assert!(pages.len() > 1);
    }

    #[test]
    fn test_link_produces_hotspot() {
        let mut engine = engine();
        let node = PdfNode::Text {
            segments: vec![Segment {
                text: "visit".to_string(),
                styles: Styles::default(),
                link: Some("https://example.com".to_string()),
            }],
            style: STYLE_BODY,
            alignment: None,
        };
        engine.render_node(&node, 0.0);
        let pages = engine.render(&[]);
        assert_eq!(pages[0].links.len(), 1);
        assert_eq!(pages[0].links[0].uri, "https://example.com");
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(winansi("abc"), b"abc".to_vec());
        assert_eq!(winansi("\u{2022}"), vec![0x95]);
        assert_eq!(winansi("\u{4e16}"), vec![b'?']);
    }

    fn rendered_bytes(alignment: Option<TextAlignment>, text: &str) -> Vec<u8> {
        let mut engine = engine();
        let node = PdfNode::Text {
            segments: vec![segment(text)],
            style: STYLE_BODY,
            alignment,
        };
        engine.render_node(&node, 0.0);
        let pages = engine.render(&[]);
        pages.into_iter().next().unwrap().content.finish().to_vec()
    }

    #[test]
    fn test_each_word_is_shown_exactly_once() {
        let stream = String::from_utf8_lossy(&rendered_bytes(None, "alpha beta")).to_string();
        assert_eq!(stream.matches("alpha").count(), 1);
        assert_eq!(stream.matches("beta").count(), 1);
        // Words are positioned individually; the segment never appears as
        // one run.
        assert!(!stream.contains("alpha beta"));
    }

    #[test]
    fn test_justify_widens_gaps_on_wrapped_lines() {
        // Wrapped paragraph: the non-final lines stretch, so word positions
        // differ from the left-aligned rendering.
        let long = "word ".repeat(60);
        assert_ne!(
            rendered_bytes(Some(TextAlignment::Justify), &long),
            rendered_bytes(None, &long),
        );
        // Single line: nothing to stretch (it is the last line).
        assert_eq!(
            rendered_bytes(Some(TextAlignment::Justify), "just one line"),
            rendered_bytes(None, "just one line"),
        );
    }

    #[test]
    fn test_center_and_right_shift_line_start() {
        let centered = rendered_bytes(Some(TextAlignment::Center), "short");
        let left = rendered_bytes(None, "short");
        let right = rendered_bytes(Some(TextAlignment::Right), "short");
        assert_ne!(centered, left);
        assert_ne!(right, left);
        assert_ne!(centered, right);
    }
}
