//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight, LuCopy as Copy,
        LuExternalLink as ExternalLink, LuFile as File, LuFileSpreadsheet as FileSheet,
        LuFileText as FilePdf, LuPlay as Play, LuRotateCcw as Reset, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowCounterclockwise as Reset, BsBoxArrowUpRight as ExternalLink,
        BsChevronLeft as ChevronLeft, BsChevronRight as ChevronRight, BsClipboard as Copy,
        BsCloudUpload as Upload, BsFileEarmark as File, BsFileEarmarkPdf as FilePdf,
        BsFileEarmarkSpreadsheet as FileSheet, BsPlayFill as Play, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(FILE, File);
themed_icon!(FILE_PDF, FilePdf);
themed_icon!(FILE_SHEET, FileSheet);
themed_icon!(UPLOAD, Upload);
themed_icon!(CLOSE, Close);
themed_icon!(COPY, Copy);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(PLAY, Play);
themed_icon!(RESET, Reset);

/// Icon for a document kind.
pub fn for_kind(kind: customs_core::FileKind) -> Icon {
    match kind {
        customs_core::FileKind::Pdf => FILE_PDF,
        customs_core::FileKind::Tabular => FILE_SHEET,
        customs_core::FileKind::Unsupported => FILE,
    }
}
