//! Page-ready initializer
//!
//! Three independent actions run once the document is parsed: wire the export
//! trigger, inject the icon stylesheet, activate tooltips. A failure in one is
//! logged and does not stop the others.

use std::cell::Cell;

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, HtmlLinkElement, Window};

use crate::config::PageConfig;
use crate::export::ExportError;

thread_local! {
    static READY_REGISTERED: Cell<bool> = Cell::new(false);
}

/// What the initializer did
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub trigger_attached: bool,
    pub stylesheet_injected: bool,
    pub tooltips_activated: usize,
}

/// Result of asking for page initialization
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ReadyStatus {
    /// The document was already parsed; `initialize` ran immediately
    Initialized { report: PageReport },
    /// `initialize` will run on `DOMContentLoaded`
    Deferred,
    /// An earlier call already registered the initializer; this config is unused
    AlreadyRegistered,
}

/// Run `initialize` once the DOM is ready
///
/// Registers at most once per module instance.
pub fn on_ready(window: Window, config: PageConfig) -> Result<ReadyStatus, ExportError> {
    if READY_REGISTERED.with(|flag| flag.replace(true)) {
        log::warn!("Page initializer already registered, ignoring");
        return Ok(ReadyStatus::AlreadyRegistered);
    }

    let document = super::document(&window)?;
    if document.ready_state() != "loading" {
        let report = initialize(&window, &document, &config);
        return Ok(ReadyStatus::Initialized { report });
    }

    let listener_window = window.clone();
    let listener_document = document.clone();
    let on_loaded = Closure::once(move || {
        initialize(&listener_window, &listener_document, &config);
    });

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_loaded.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| ExportError::dom("adding DOMContentLoaded listener", &e))?;
    on_loaded.forget();

    Ok(ReadyStatus::Deferred)
}

pub fn initialize(window: &Window, document: &Document, config: &PageConfig) -> PageReport {
    let mut report = PageReport::default();

    match find_trigger(document, config) {
        Ok(Some(element)) => match super::trigger::attach(element, window.clone(), config.clone()) {
            Ok(()) => report.trigger_attached = true,
            Err(err) => log::error!("Attaching export trigger failed: {}", err),
        },
        Ok(None) => log::debug!("No export trigger on this page"),
        Err(err) => log::error!("Looking up export trigger failed: {}", err),
    }

    match inject_stylesheet(document, &config.stylesheet_url) {
        Ok(_) => report.stylesheet_injected = true,
        Err(err) => log::error!("Injecting stylesheet failed: {}", err),
    }

    match activate_tooltips(window, document, &config.tooltip_selector) {
        Ok(count) => report.tooltips_activated = count,
        Err(err) => log::error!("Activating tooltips failed: {}", err),
    }

    log::info!("Page initialized: {:?}", report);
    report
}

/// First anchor whose href contains the trigger keyword
pub fn find_trigger(document: &Document, config: &PageConfig) -> Result<Option<HtmlElement>, ExportError> {
    let selector = config.trigger_selector();
    let found = document
        .query_selector(&selector)
        .map_err(|e| ExportError::dom("querying export trigger", &e))?;

    found
        .map(|element| {
            element
                .dyn_into::<HtmlElement>()
                .map_err(|e| ExportError::dom("export trigger is not an HTML element", &e))
        })
        .transpose()
}

/// Append `<link rel="stylesheet" href=url>` to the document head
pub fn inject_stylesheet(document: &Document, url: &str) -> Result<HtmlLinkElement, ExportError> {
    let head = document
        .head()
        .ok_or_else(|| ExportError::Dom("document has no head".to_string()))?;

    let link: HtmlLinkElement = document
        .create_element("link")
        .map_err(|e| ExportError::dom("creating stylesheet link", &e))?
        .dyn_into()
        .map_err(|e| ExportError::dom("stylesheet link is not a <link>", &e))?;
    link.set_rel("stylesheet");
    link.set_href(url);

    head.append_child(&link)
        .map_err(|e| ExportError::dom("appending stylesheet link", &e))?;
    Ok(link)
}

/// Construct `bootstrap.Tooltip` on every element matching `selector`
///
/// Returns the number of tooltips created. Without a global `bootstrap`
/// nothing is activated.
pub fn activate_tooltips(window: &Window, document: &Document, selector: &str) -> Result<usize, ExportError> {
    let Some(constructor) = tooltip_constructor(window)? else {
        log::warn!("bootstrap.Tooltip is not available, skipping tooltips");
        return Ok(0);
    };

    let elements = document
        .query_selector_all(selector)
        .map_err(|e| ExportError::dom("querying tooltip elements", &e))?;

    let mut activated = 0;
    for index in 0..elements.length() {
        let Some(element) = elements.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        match Reflect::construct(&constructor, &Array::of1(&element)) {
            Ok(_) => activated += 1,
            Err(e) => log::warn!("{}", ExportError::dom("creating tooltip", &e)),
        }
    }

    Ok(activated)
}

fn tooltip_constructor(window: &Window) -> Result<Option<Function>, ExportError> {
    let bootstrap = Reflect::get(window, &JsValue::from_str("bootstrap"))
        .map_err(|e| ExportError::dom("reading window.bootstrap", &e))?;
    if bootstrap.is_undefined() || bootstrap.is_null() {
        return Ok(None);
    }

    let tooltip = Reflect::get(&bootstrap, &JsValue::from_str("Tooltip"))
        .map_err(|e| ExportError::dom("reading bootstrap.Tooltip", &e))?;
    Ok(tooltip.dyn_into::<Function>().ok())
}
