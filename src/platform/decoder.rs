use std::future::Future;

use customs_core::preview::{Grid, TabularDecoder, decode_workbook};
use customs_core::{DecodeError, FileHandle};
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::utils::error::js_error_text;

/// Reads a `File` into memory and decodes its first worksheet.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl TabularDecoder<File> for FileDecoder {
    fn decode(&self, file: &FileHandle<File>) -> impl Future<Output = Result<Grid, DecodeError>> {
        let read = file.blob().array_buffer();
        async move {
            let buffer = JsFuture::from(read)
                .await
                .map_err(|e| DecodeError::Read(js_error_text(&e)))?;
            let bytes = Uint8Array::new(&buffer).to_vec();
            decode_workbook(&bytes)
        }
    }
}
