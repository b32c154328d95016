//! UI components built with Leptos.
//!
//! - [`Shell`] - Page layout (header, workspace, result panel)
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`uploader`] - Drag-and-drop file selection and upload list
//! - [`viewer`] - Paged preview of the selected documents
//! - [`editor`] - Processing controls, result fields, and export

pub mod editor;
mod header;
pub mod icons;
mod shell;
pub mod uploader;
pub mod viewer;

pub use shell::Shell;
