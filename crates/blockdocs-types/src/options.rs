/*
 * options.rs
 * Copyright (c) 2025 blockdocs contributors
 */

use serde::{Deserialize, Serialize};

/// Options for document generation, shared by both writers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentOptions {
    /// Document title (metadata only).
    pub title: Option<String>,
    /// Document author (metadata only).
    pub author: Option<String>,
    pub page_size: PageSize,
    /// Page margins in points. Each writer has its own per-side default:
    /// one inch for DOCX, 40pt for PDF.
    pub margins: Margins,
    /// When set, list items are indented by their block-tree depth instead
    /// of always rendering at the top level.
    pub nested_lists: bool,
}

/// Physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    #[serde(rename = "LETTER")]
    Letter,
}

/// Page margins in points; absent sides take the writer's default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl Margins {
    /// Fill in absent sides with `default_pt` points.
    pub fn resolved(&self, default_pt: f64) -> ResolvedMargins {
        ResolvedMargins {
            top: self.top.unwrap_or(default_pt),
            bottom: self.bottom.unwrap_or(default_pt),
            left: self.left.unwrap_or(default_pt),
            right: self.right.unwrap_or(default_pt),
        }
    }
}

/// Margins with all four sides resolved, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}
