//! Format classification and size formatting.

use std::fmt;

/// PDF media type.
pub const PDF_MIME: &str = "application/pdf";

/// Spreadsheet media types accepted as tabular input.
pub const SPREADSHEET_MIMES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Preview classification of a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Tabular,
    Unsupported,
}

impl FileKind {
    /// Whether files of this kind pass the upload boundary.
    #[inline]
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Tabular => write!(f, "tabular"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Classify a file from its name and declared media type.
///
/// Name and media type are OR'd, so the check order does not matter.
pub fn classify(name: &str, mime_hint: &str) -> FileKind {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    if mime_hint == PDF_MIME || ext.as_deref() == Some("pdf") {
        FileKind::Pdf
    } else if matches!(ext.as_deref(), Some("xlsx" | "xls")) || SPREADSHEET_MIMES.contains(&mime_hint)
    {
        FileKind::Tabular
    } else {
        FileKind::Unsupported
    }
}

/// Format a byte count for the upload list (e.g., "1.5 KB", "0 Bytes").
///
/// Uses 1024-based units and rounds to at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    const STEP: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_name() {
        assert_eq!(classify("INVOICE.XLSX", ""), FileKind::Tabular);
        assert_eq!(classify("invoice.xlsx", ""), FileKind::Tabular);
        assert_eq!(classify("packing.Xls", ""), FileKind::Tabular);
        assert_eq!(classify("bill.PDF", ""), FileKind::Pdf);
        assert_eq!(classify("notes.txt", ""), FileKind::Unsupported);
        assert_eq!(classify("xlsx", ""), FileKind::Unsupported);
    }

    #[test]
    fn test_classify_by_mime() {
        assert_eq!(classify("doc", "application/pdf"), FileKind::Pdf);
        assert_eq!(classify("sheet", "application/vnd.ms-excel"), FileKind::Tabular);
        assert_eq!(
            classify(
                "upload",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            ),
            FileKind::Tabular
        );
        assert_eq!(classify("notes.txt", "text/plain"), FileKind::Unsupported);
    }

    #[test]
    fn test_pdf_mime_wins_over_sheet_name() {
        assert_eq!(classify("export.xlsx", "application/pdf"), FileKind::Pdf);
    }

    #[test]
    fn test_is_accepted() {
        assert!(FileKind::Pdf.is_accepted());
        assert!(FileKind::Tabular.is_accepted());
        assert!(!FileKind::Unsupported.is_accepted());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }
}
