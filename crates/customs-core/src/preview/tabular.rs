//! Tabular decoding of spreadsheet files.

use std::fmt;
use std::future::{self, Future};
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::DecodeError;
use crate::file::FileHandle;

/// One spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Number(*i as f64),
            Data::Bool(b) => Self::Bool(*b),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Rectangular grid of cells, row-major.
pub type Grid = Vec<Vec<CellValue>>;

/// Platform decoder turning a file's bytes into a [`Grid`].
///
/// The returned future may suspend (reading a browser `File` does); the
/// cache is never borrowed while it runs.
pub trait TabularDecoder<B> {
    fn decode(&self, file: &FileHandle<B>) -> impl Future<Output = Result<Grid, DecodeError>>;
}

/// Decode the first worksheet of an xlsx/xls/xlsb/ods workbook.
pub fn decode_workbook(bytes: &[u8]) -> Result<Grid, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DecodeError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoSheets)?
        .map_err(|e| DecodeError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect())
}

/// Decoder for in-memory handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesDecoder;

impl TabularDecoder<Vec<u8>> for BytesDecoder {
    fn decode(&self, file: &FileHandle<Vec<u8>>) -> impl Future<Output = Result<Grid, DecodeError>> {
        future::ready(decode_workbook(file.blob()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_data() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
        assert_eq!(
            CellValue::from(&Data::String("HS 8471".into())),
            CellValue::Text("HS 8471".into())
        );
        assert_eq!(CellValue::from(&Data::Int(12)), CellValue::Number(12.0));
        assert_eq!(CellValue::from(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(CellValue::from(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(12.0).to_string(), "12");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Text("kg".into()).to_string(), "kg");
    }

    #[test]
    fn test_decode_rejects_non_workbook() {
        let result = decode_workbook(b"%PDF-1.7 definitely not a spreadsheet");
        assert!(matches!(result, Err(DecodeError::Workbook(_))));
    }

    #[tokio::test]
    async fn test_bytes_decoder_reports_failure() {
        let file = FileHandle::from_bytes("broken.xlsx", "", vec![0u8; 16]);
        assert!(BytesDecoder.decode(&file).await.is_err());
    }
}
