//! Platform-independent core for the customs document desk.
//!
//! - [`file`] - [`FileHandle`] identity and metadata
//! - [`format`] - Format classification and size formatting
//! - [`preview`] - Multi-file preview cache and tabular decoding
//! - [`result`] - Processing result record, edits, and fallback-key lookup
//! - [`export`] - Form pre-fill URL building
//! - [`error`] - Error types shared across modules

pub mod error;
pub mod export;
pub mod file;
pub mod format;
pub mod preview;
pub mod result;

pub use error::{DecodeError, ExportError, PreviewError};
pub use export::FormPrefill;
pub use file::{FileHandle, FileId};
pub use format::{FileKind, classify, format_file_size};
pub use preview::{
    CellValue, DecodeJob, DecodeOutcome, DecodeResult, Direction, DisplayHandle, DisplayHandles,
    Grid, Lookup, PreviewArtifact, PreviewCache, TabularDecoder,
};
pub use result::{ExportField, ProcessingResult, ResultEdit};
