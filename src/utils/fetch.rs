//! Network utilities for the processing service.
//!
//! Uploads the selected files as a multipart form and races the request
//! against a timeout.

use customs_core::ProcessingResult;
use js_sys::{Array, Promise};
use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

use crate::config::{PROCESS_TIMEOUT_MS, UPLOAD_FIELD, process_url};
use crate::utils::error::{FetchError, js_error_text};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout.
///
/// # Returns
/// * `RaceResult::Completed` if promise resolves before timeout
/// * `RaceResult::TimedOut` if timeout occurs first
/// * `RaceResult::Error` if promise rejects
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined when the timer fires
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(js_error_text(&e)),
    }
}

// =============================================================================
// Processing Request
// =============================================================================

/// Send the files to the processing service and parse its result.
///
/// One multipart part per file, all under the same field name. A non-2xx
/// response is returned as [`FetchError::HttpError`] carrying the body text.
pub async fn process_documents(files: &[File]) -> Result<ProcessingResult, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let form = FormData::new().map_err(|_| FetchError::RequestCreationFailed)?;
    for file in files {
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(|_| FetchError::RequestCreationFailed)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = process_url();
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    info!("process: uploading {} file(s) to {}", files.len(), url);
    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, PROCESS_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

            if !resp.ok() {
                let status = resp.status();
                let body = read_text(&resp).await.unwrap_or_default();
                debug!("process: service answered {}", status);
                return Err(FetchError::HttpError { status, body });
            }

            let text = read_text(&resp).await?;
            ProcessingResult::from_json(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
        }
    }
}

async fn read_text(resp: &Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;

    text.as_string().ok_or(FetchError::InvalidContent)
}
