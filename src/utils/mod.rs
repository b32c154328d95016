//! Utility modules for web, DOM, and network operations.
//!
//! Provides:
//! - [`process_documents`] - Multipart upload to the processing service
//! - [`dom`] - Window, clipboard, and navigation helpers
//! - [`logging`] - `log` backend writing to the browser console

pub mod dom;
pub mod error;
mod fetch;
pub mod logging;

pub use fetch::process_documents;
