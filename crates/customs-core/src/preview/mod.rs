//! Multi-file preview cache.
//!
//! Maps the current selection of [`FileHandle`](crate::FileHandle)s to
//! [`PreviewArtifact`]s and keeps resource usage bounded to exactly that
//! selection.
//!
//! Two platform seams keep this module independent of the browser:
//! - [`DisplayHandles`] - acquire and release revocable display handles
//! - [`TabularDecoder`] - asynchronously decode spreadsheet bytes

mod artifact;
mod cache;
mod tabular;

pub use artifact::{ArtifactId, DisplayHandle, DisplayHandles, PreviewArtifact};
pub use cache::{
    DecodeJob, DecodeOutcome, DecodeResult, DecodeTicket, Direction, Lookup, PreviewCache,
};
pub use tabular::{BytesDecoder, CellValue, Grid, TabularDecoder, decode_workbook};
