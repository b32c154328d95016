//! Structured result returned by the processing service.
//!
//! - [`ProcessingResult`] - Typed record with lenient deserialization
//! - [`ResultEdit`] - Field edits coming from the result editor
//! - [`ExportField`] - Logical export fields and their fallback key spellings

mod edit;
mod fields;
mod record;

pub use edit::ResultEdit;
pub use fields::{ExportField, lookup, resolve};
pub use record::{ProcessingResult, strip_code_fence};
