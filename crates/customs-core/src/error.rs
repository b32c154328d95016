//! Error types for the core crate.
//!
//! - [`PreviewError`] - Preview cache lookups and display-handle allocation
//! - [`DecodeError`] - Tabular decoding failures
//! - [`ExportError`] - Form pre-fill and JSON export failures

use thiserror::Error;

use crate::file::FileId;

/// Preview cache errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// The handle is not part of the current selection.
    #[error("file {0} is not in the current selection")]
    NotSelected(FileId),
    /// The platform refused to create a display handle.
    #[error("display handle unavailable: {0}")]
    HandleUnavailable(String),
}

/// Tabular decoding errors.
///
/// These never reach the artifact; the cache only logs them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Reading the file bytes failed.
    #[error("failed to read file: {0}")]
    Read(String),
    /// The bytes are not a readable workbook.
    #[error("not a readable workbook: {0}")]
    Workbook(String),
    /// The workbook has no worksheet to show.
    #[error("workbook has no worksheets")]
    NoSheets,
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The configured form endpoint is not a valid absolute URL.
    #[error("invalid form endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    /// The result could not be serialized.
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}
