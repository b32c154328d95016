//! Error types for browser-side operations.
//!
//! - [`FetchError`] - Network/fetch errors for the processing request
//! - [`ClipboardError`] - Clipboard write failures

use std::fmt;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to build the request or its multipart body
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    NetworkError(String),
    /// Non-2xx response; `body` is the response text
    HttpError { status: u16, body: String },
    /// Failed to read response body
    ResponseReadFailed,
    /// Invalid response content (not text)
    InvalidContent,
    /// JSON parsing error
    JsonParseError(String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError { status, body } if body.trim().is_empty() => {
                write!(f, "HTTP error: {}", status)
            }
            Self::HttpError { body, .. } => write!(f, "{}", body),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Clipboard write errors.
#[derive(Debug, Clone)]
pub enum ClipboardError {
    /// Browser window not available
    NoWindow,
    /// The browser rejected the write (permissions, insecure context)
    WriteRejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::WriteRejected(msg) => write!(f, "Clipboard write rejected: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Best-effort text of a JavaScript error value.
pub fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}
