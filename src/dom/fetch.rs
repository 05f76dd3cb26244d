//! Export request over `window.fetch`

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::export::ExportError;

/// GET `url` and return the response body as text
///
/// The HTTP status is not inspected: an error page fails JSON validation
/// further down and ends up on the same path as a network failure.
pub async fn fetch_text(window: &Window, url: &str) -> Result<String, ExportError> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ExportError::transport("fetch rejected", &e))?;

    let response: Response = response
        .dyn_into()
        .map_err(|e| ExportError::transport("fetch did not resolve to a Response", &e))?;

    log::debug!("Export response status: {}", response.status());

    let text_promise = response
        .text()
        .map_err(|e| ExportError::transport("response body unavailable", &e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| ExportError::transport("reading response body failed", &e))?;

    text.as_string()
        .ok_or_else(|| ExportError::Transport("response body is not text".to_string()))
}
