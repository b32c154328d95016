use customs_core::{DisplayHandle, DisplayHandles, FileHandle, PreviewError};
use log::warn;
use web_sys::{File, Url};

use crate::utils::error::js_error_text;

/// Object URLs created with `URL.createObjectURL`.
#[derive(Debug, Default)]
pub struct ObjectUrls;

impl DisplayHandles<File> for ObjectUrls {
    fn acquire(&mut self, file: &FileHandle<File>) -> Result<DisplayHandle, PreviewError> {
        Url::create_object_url_with_blob(file.blob())
            .map(DisplayHandle::new)
            .map_err(|e| PreviewError::HandleUnavailable(js_error_text(&e)))
    }

    fn release(&mut self, handle: &DisplayHandle) {
        if let Err(e) = Url::revoke_object_url(handle.as_str()) {
            warn!("preview: failed to revoke {}: {}", handle, js_error_text(&e));
        }
    }
}
