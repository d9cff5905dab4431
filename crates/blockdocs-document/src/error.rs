/*
 * error.rs
 * Copyright (c) 2025 blockdocs contributors
 */

//! Error types for the document writers.
//!
//! Merging and extraction are total; only packaging and layout can fail.
//! Writer errors carry no retry logic — the caller surfaces them and may
//! re-invoke the writer itself.

use thiserror::Error;

/// Errors from the DOCX writer.
#[derive(Debug, Error)]
pub enum DocxError {
    /// Failure while assembling one of the package's parts.
    #[error("failed to assemble document part: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while packaging the parts into the OOXML zip container.
    #[error("failed to package document archive: {0}")]
    Package(#[from] zip::result::ZipError),
}

/// Errors from the PDF writer.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The page size and margins leave no usable content area.
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for DOCX generation.
pub type DocxResult<T> = Result<T, DocxError>;

/// Result type for PDF generation.
pub type PdfResult<T> = Result<T, PdfError>;
