//! Browser implementations of the preview cache seams.
//!
//! - [`ObjectUrls`] - Display handles as `blob:` object URLs
//! - [`FileDecoder`] - Spreadsheet decoding from `File` bytes

mod decoder;
mod object_urls;

pub use decoder::FileDecoder;
pub use object_urls::ObjectUrls;

use customs_core::FileHandle;
use web_sys::File;

/// Wrap a browser file with its name, size, and declared type.
pub fn file_handle(file: File) -> FileHandle<File> {
    let name = file.name();
    let mime = file.type_();
    let size = file.size().max(0.0) as u64;
    FileHandle::new(name, mime, size, file)
}
