//! Export Page WASM Module
//!
//! Wires the page's export anchor to an asynchronous export request, keeps
//! the anchor in a busy state while the request is in flight, and hands the
//! produced file to the browser's native download. At page-ready it also
//! injects the icon stylesheet and activates tooltips.

pub mod api;
pub mod config;
pub mod dom;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use config::PageConfig;
pub use export::{ExportError, ExportOutcome, ExportWorkflow, TriggerHost};
pub use models::{ExportResponse, TriggerSnapshot};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("[WASM] ⚠️ logger already set: {}", e).into());
        }
    }

    log::info!("Export page WASM module initialized");

    #[cfg(feature = "autostart")]
    {
        let started = dom::window().and_then(|window| dom::page::on_ready(window, PageConfig::default()));
        if let Err(err) = started {
            log::error!("Page initializer not registered: {}", err);
        }
    }
}
