//! Export response model
//!
//! The server answers the export request with a loosely shaped JSON object:
//!
//! ```json
//! { "success": true,  "filename": "exports/product_data_20240101.xlsx" }
//! { "success": false, "message": "No data to export" }
//! { "success": false, "error": "No data to export" }
//! ```
//!
//! It is validated once, here, into a tagged variant. `success` must be a
//! boolean and a successful response must carry a non-empty string
//! `filename`; `message`/`error` are only display text, so a badly typed one
//! is shown as its JSON text (numbers, booleans) or ignored.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{deserialize_lenient_message, deserialize_non_empty, serialize_option_as_null};
use crate::export::ExportError;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportResponse {
    /// The export file is ready; `resource` is both download URL and suggested name
    Success { resource: String },
    /// The server declined; `message` is shown to the user when present
    Failure {
        #[serde(serialize_with = "serialize_option_as_null")]
        message: Option<String>,
    },
}

/// Wire shape, before validation
#[derive(Deserialize, Debug)]
struct RawExportResponse {
    success: bool,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    filename: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_message")]
    message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_message")]
    error: Option<String>,
}

impl TryFrom<RawExportResponse> for ExportResponse {
    type Error = ExportError;

    fn try_from(raw: RawExportResponse) -> Result<Self, Self::Error> {
        if raw.success {
            let resource = raw.filename.ok_or_else(|| {
                ExportError::MalformedResponse("successful response without a filename".to_string())
            })?;
            Ok(ExportResponse::Success { resource })
        } else {
            Ok(ExportResponse::Failure {
                message: raw.message.or(raw.error),
            })
        }
    }
}

impl ExportResponse {
    /// Parse and validate a response body
    pub fn from_json(body: &str) -> Result<Self, ExportError> {
        let raw: RawExportResponse = serde_json::from_str(body)
            .map_err(|e| ExportError::MalformedResponse(e.to_string()))?;
        raw.try_into()
    }
}
