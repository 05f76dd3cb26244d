//! Export page WASM API
//!
//! JavaScript-facing entry points. Pages call `initExportPage` once after
//! loading the module. Builds with the `autostart` feature run the
//! initializer with the default configuration from the start function
//! instead, and `initExportPage` then reports `alreadyRegistered`.
//!
//! - `helpers`: console logging macros and serde conversions

pub mod helpers;

use wasm_bindgen::prelude::*;

use crate::config::PageConfig;
use crate::dom;
use crate::dom::page::ReadyStatus;
use crate::models::ExportResponse;
use crate::{wasm_error, wasm_log, wasm_warn};

/// Register the page-ready initializer, optionally overriding configuration
///
/// `config` is a partial object with camelCase keys (e.g.
/// `{ triggerKeyword: "download" }`); missing keys keep their defaults.
///
/// Returns `{ status: "initialized", report }`, `{ status: "deferred" }` when
/// the document is still loading, or `{ status: "alreadyRegistered" }`.
#[wasm_bindgen(js_name = initExportPage)]
pub fn init_export_page(config: JsValue) -> Result<JsValue, JsValue> {
    let config: PageConfig = if config.is_undefined() || config.is_null() {
        PageConfig::default()
    } else {
        helpers::deserialize(config, "Invalid export page config")?
    };
    wasm_log!("initExportPage called: trigger keyword '{}'", config.trigger_keyword);

    let window = dom::window()?;
    let status = dom::page::on_ready(window, config)?;
    if status == ReadyStatus::AlreadyRegistered {
        wasm_warn!("initExportPage: page initializer already registered, config ignored");
    }
    helpers::serialize(&status, "Failed to serialize page status")
}

/// Validate an export response body
///
/// Returns `{ kind: "success", resource }` or `{ kind: "failure", message }`;
/// throws a string when the body is not a valid export response.
#[wasm_bindgen(js_name = parseExportResponse)]
pub fn parse_export_response(json: &str) -> Result<JsValue, JsValue> {
    let response = ExportResponse::from_json(json).map_err(|e| {
        wasm_error!("parseExportResponse: {}", e);
        JsValue::from(e)
    })?;
    helpers::serialize(&response, "Failed to serialize export response")
}

/// Default configuration, as a plain object
#[wasm_bindgen(js_name = defaultExportConfig)]
pub fn default_export_config() -> Result<JsValue, JsValue> {
    helpers::serialize(&PageConfig::default(), "Failed to serialize config")
}
