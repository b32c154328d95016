//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Deployment-specific URLs are read at compile time from environment
//! variables, with same-origin defaults.

use customs_core::{ExportField, FormPrefill};
use log::LevelFilter;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "AI Customs Tool";

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL of the processing API (`CUSTOMS_API_BASE_URL` at build time).
///
/// Empty means same origin.
pub const API_BASE_URL: &str = match option_env!("CUSTOMS_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

/// Path of the document processing endpoint.
pub const PROCESS_ENDPOINT: &str = "/api/process-documents";

/// Multipart field name for uploaded files.
pub const UPLOAD_FIELD: &str = "files";

/// Processing request timeout in milliseconds.
///
/// Extraction runs an LLM over every document, so this is generous.
pub const PROCESS_TIMEOUT_MS: i32 = 120_000;

/// Full URL of the processing endpoint.
pub fn process_url() -> String {
    format!("{}{}", API_BASE_URL.trim_end_matches('/'), PROCESS_ENDPOINT)
}

// =============================================================================
// Preview Configuration
// =============================================================================

/// Maximum number of spreadsheet rows rendered in the viewer.
pub const MAX_PREVIEW_ROWS: usize = 200;

/// `accept` attribute of the file picker.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.xlsx,.xls";

// =============================================================================
// Export Configuration
// =============================================================================

/// External form endpoint (`CUSTOMS_FORM_URL` at build time).
pub const FORM_URL: &str = match option_env!("CUSTOMS_FORM_URL") {
    Some(url) => url,
    None => "https://docs.google.com/forms/d/e/customs-export/viewform",
};

/// Entry IDs of the external form, in form order.
///
/// These are the numeric suffixes of the form's `entry.<ID>` inputs.
pub const FORM_ENTRIES: &[(ExportField, &str)] = &[
    (ExportField::BillOfLading, "1000001"),
    (ExportField::ContainerNumber, "1000002"),
    (ExportField::ConsigneeName, "1000003"),
    (ExportField::ConsigneeAddress, "1000004"),
    (ExportField::DateOfExport, "1000005"),
    (ExportField::LineItemCount, "1000006"),
    (ExportField::AverageGrossWeight, "1000007"),
    (ExportField::AveragePrice, "1000008"),
];

/// The configured form pre-fill builder.
pub fn form_prefill() -> FormPrefill {
    FormPrefill::with_entries(FORM_URL, FORM_ENTRIES)
}

/// How long the "Copied" notice stays visible, in milliseconds.
pub const COPY_NOTICE_MS: u32 = 2000;

// =============================================================================
// Logging
// =============================================================================

/// Console log level.
pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
