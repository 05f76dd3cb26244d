//! The export anchor and its click handler

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlAnchorElement, HtmlElement, Window};

use super::fetch::fetch_text;
use crate::config::PageConfig;
use crate::export::{ExportError, ExportOutcome, ExportWorkflow, TriggerHost};
use crate::models::TriggerSnapshot;

/// `TriggerHost` backed by a live DOM element
pub struct DomTrigger {
    element: HtmlElement,
    window: Window,
    document: Document,
}

impl DomTrigger {
    pub fn new(element: HtmlElement, window: Window) -> Result<Self, ExportError> {
        let document = super::document(&window)?;
        Ok(Self { element, window, document })
    }

    fn set_or_remove(&self, name: &str, value: Option<&str>) -> Result<(), JsValue> {
        match value {
            Some(value) => self.element.set_attribute(name, value),
            None => self.element.remove_attribute(name),
        }
    }
}

impl TriggerHost for DomTrigger {
    fn target(&self) -> String {
        self.element.get_attribute("href").unwrap_or_default()
    }

    fn snapshot(&self) -> TriggerSnapshot {
        TriggerSnapshot {
            label: self.element.inner_html(),
            disabled: self.element.get_attribute("disabled"),
            aria_disabled: self.element.get_attribute("aria-disabled"),
        }
    }

    fn show_busy(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
        // Anchors have no `disabled` property; the attribute drives styling
        // and `aria-disabled` covers assistive technology.
        let result = self
            .element
            .set_attribute("disabled", "")
            .and_then(|_| self.element.set_attribute("aria-disabled", "true"));
        if let Err(e) = result {
            log::warn!("{}", ExportError::dom("disabling trigger", &e));
        }
    }

    fn restore(&mut self, snapshot: &TriggerSnapshot) {
        self.element.set_inner_html(&snapshot.label);
        let result = self
            .set_or_remove("disabled", snapshot.disabled.as_deref())
            .and_then(|_| self.set_or_remove("aria-disabled", snapshot.aria_disabled.as_deref()));
        if let Err(e) = result {
            log::warn!("{}", ExportError::dom("restoring trigger state", &e));
        }
    }

    fn start_download(&mut self, resource: &str) -> Result<(), ExportError> {
        let body = super::body(&self.document)?;

        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(|e| ExportError::dom("creating download anchor", &e))?
            .dyn_into()
            .map_err(|e| ExportError::dom("download anchor is not an <a>", &e))?;
        anchor.set_href(resource);
        anchor.set_download(resource);
        anchor.set_hidden(true);

        body.append_child(&anchor)
            .map_err(|e| ExportError::dom("attaching download anchor", &e))?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|e| ExportError::dom("detaching download anchor", &e))?;

        log::info!("Download started: {}", resource);
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("{}", ExportError::dom("alert", &e));
        }
    }
}

/// Wire `element`'s click to the export workflow
pub fn attach(element: HtmlElement, window: Window, config: PageConfig) -> Result<(), ExportError> {
    let host = Rc::new(RefCell::new(DomTrigger::new(element.clone(), window.clone())?));
    let workflow = Rc::new(RefCell::new(ExportWorkflow::new(config)));

    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let activation = workflow.borrow_mut().begin(&mut *host.borrow_mut());
        let Some(activation) = activation else {
            return;
        };

        let host = Rc::clone(&host);
        let workflow = Rc::clone(&workflow);
        let window = window.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let started = super::now_ms(&window);
            let body = fetch_text(&window, activation.target()).await;
            let outcome = workflow
                .borrow_mut()
                .settle(activation, body, &mut *host.borrow_mut());

            let elapsed = match (started, super::now_ms(&window)) {
                (Some(start), Some(end)) => format!("{:.1}ms", end - start),
                _ => "n/a".to_string(),
            };
            match outcome {
                ExportOutcome::Downloaded { resource } => {
                    log::info!("Export finished in {}: {}", elapsed, resource)
                }
                ExportOutcome::Declined { message } => log::info!(
                    "Export declined in {}: {}",
                    elapsed,
                    message.as_deref().unwrap_or("(no message)")
                ),
                ExportOutcome::Failed(_) => log::info!("Export failed after {}", elapsed),
            }
        });
    });

    element
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| ExportError::dom("adding click listener", &e))?;
    // The handler lives as long as the page
    on_click.forget();

    Ok(())
}
