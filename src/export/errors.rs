//! Error types for the export workflow
//!
//! Declared failures (`success: false`) are not errors; they are a regular
//! `ExportResponse::Failure`. Everything here ends an activation with the
//! generic failure notice.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The request was rejected or the body could not be read
    #[error("Export request failed: {0}")]
    Transport(String),

    /// The body was not JSON or did not have the expected shape
    #[error("Malformed export response: {0}")]
    MalformedResponse(String),

    /// A DOM object was unavailable or a DOM call threw
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ExportError {
    pub fn dom(context: &str, value: &JsValue) -> Self {
        ExportError::Dom(format!("{}: {}", context, describe_js_value(value)))
    }

    pub fn transport(context: &str, value: &JsValue) -> Self {
        ExportError::Transport(format!("{}: {}", context, describe_js_value(value)))
    }
}

impl From<ExportError> for JsValue {
    fn from(err: ExportError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort human readable text for a thrown JS value
pub fn describe_js_value(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
