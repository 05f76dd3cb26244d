//! Browser bindings
//!
//! Everything that touches `web_sys` lives here; the export state machine in
//! `crate::export` only sees the `TriggerHost` trait.

pub mod fetch;
pub mod page;
pub mod trigger;

use web_sys::{Document, HtmlElement, Window};

use crate::export::ExportError;

pub fn window() -> Result<Window, ExportError> {
    web_sys::window().ok_or_else(|| ExportError::Dom("no global window".to_string()))
}

pub fn document(window: &Window) -> Result<Document, ExportError> {
    window
        .document()
        .ok_or_else(|| ExportError::Dom("window has no document".to_string()))
}

pub fn body(document: &Document) -> Result<HtmlElement, ExportError> {
    document
        .body()
        .ok_or_else(|| ExportError::Dom("document has no body".to_string()))
}

/// Milliseconds from the window's high resolution clock, if available
pub fn now_ms(window: &Window) -> Option<f64> {
    window.performance().map(|p| p.now())
}
