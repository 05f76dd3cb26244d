//! WASM browser tests
//!
//! Exercise the DOM adapters against a real document. Each test uses its own
//! keyword, selector or stylesheet URL so tests sharing the page stay
//! independent.

#![cfg(target_arch = "wasm32")]

use export_trigger_wasm::api::{init_export_page, parse_export_response};
use export_trigger_wasm::dom::page::{activate_tooltips, find_trigger, initialize, inject_stylesheet};
use export_trigger_wasm::dom::trigger::{attach, DomTrigger};
use export_trigger_wasm::{ExportWorkflow, PageConfig, TriggerHost};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn page() -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    (window, document)
}

fn append_html(document: &Document, html: &str) -> HtmlElement {
    let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    container.set_inner_html(html);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn test_initialize_without_trigger() {
    let (window, document) = page();
    let config = PageConfig {
        trigger_keyword: "no-such-export-keyword".to_string(),
        stylesheet_url: "https://example.test/no-trigger.css".to_string(),
        ..PageConfig::default()
    };

    let report = initialize(&window, &document, &config);

    assert!(!report.trigger_attached);
    assert!(report.stylesheet_injected);
    assert_eq!(report.tooltips_activated, 0);
    assert_eq!(count(&document, "link[href=\"https://example.test/no-trigger.css\"]"), 1);
}

#[wasm_bindgen_test]
fn test_initialize_attaches_first_matching_anchor() {
    let (window, document) = page();
    let container = append_html(
        &document,
        "<a id=\"first\" href=\"/report-export?category=a\">Export A</a>\
         <a id=\"second\" href=\"/report-export?category=b\">Export B</a>",
    );
    let config = PageConfig {
        trigger_keyword: "report-export".to_string(),
        stylesheet_url: "https://example.test/with-trigger.css".to_string(),
        ..PageConfig::default()
    };

    let found = find_trigger(&document, &config).unwrap().unwrap();
    assert_eq!(found.id(), "first");

    let report = initialize(&window, &document, &config);
    assert!(report.trigger_attached);
    assert_eq!(count(&document, "link[href=\"https://example.test/with-trigger.css\"]"), 1);

    container.remove();
}

#[wasm_bindgen_test]
fn test_inject_stylesheet_appends_to_head() {
    let (_, document) = page();
    let link = inject_stylesheet(&document, "https://example.test/icons.css").unwrap();

    assert_eq!(link.rel(), "stylesheet");
    assert_eq!(link.href(), "https://example.test/icons.css");
    let parent = link.parent_element().unwrap();
    assert_eq!(parent.tag_name().to_lowercase(), "head");
}

#[wasm_bindgen_test]
fn test_tooltips_skipped_without_bootstrap() {
    let (window, document) = page();
    let container = append_html(&document, "<span data-tip-none=\"tooltip\">?</span>");

    let activated = activate_tooltips(&window, &document, "[data-tip-none=\"tooltip\"]").unwrap();
    assert_eq!(activated, 0);

    container.remove();
}

#[wasm_bindgen_test]
fn test_tooltips_constructed_per_element() {
    let (window, document) = page();
    let container = append_html(
        &document,
        "<span data-tip-fake=\"tooltip\">a</span>\
         <span data-tip-fake=\"tooltip\">b</span>\
         <span>c</span>",
    );

    let tooltip = Function::new_with_args("el", "el.setAttribute('data-tooltip-ready', '1');");
    let bootstrap = js_sys::Object::new();
    Reflect::set(&bootstrap, &JsValue::from_str("Tooltip"), &tooltip).unwrap();
    Reflect::set(&window, &JsValue::from_str("bootstrap"), &bootstrap).unwrap();

    let activated = activate_tooltips(&window, &document, "[data-tip-fake=\"tooltip\"]").unwrap();

    Reflect::delete_property(&window, &JsValue::from_str("bootstrap")).unwrap();

    assert_eq!(activated, 2);
    assert_eq!(count(&document, "[data-tooltip-ready]"), 2);
    container.remove();
}

fn trigger_element(document: &Document, id: &str) -> HtmlElement {
    document.get_element_by_id(id).unwrap().dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn test_dom_trigger_busy_state_round_trip() {
    let (window, document) = page();
    let container = append_html(
        &document,
        "<a id=\"plain-trigger\" href=\"/export\"><i class=\"bi bi-download\"></i> Export</a>\
         <a id=\"aria-false-trigger\" href=\"/export\" aria-disabled=\"false\">Export</a>\
         <a id=\"disabled-trigger\" href=\"/export\" disabled=\"disabled\">Export</a>",
    );

    for id in ["plain-trigger", "aria-false-trigger", "disabled-trigger"] {
        let element = trigger_element(&document, id);
        let before_label = element.inner_html();
        let before_disabled = element.get_attribute("disabled");
        let before_aria = element.get_attribute("aria-disabled");

        let mut host = DomTrigger::new(element.clone(), window.clone()).unwrap();
        let mut workflow = ExportWorkflow::new(PageConfig::default());

        let activation = workflow.begin(&mut host).unwrap();
        assert_eq!(activation.target(), "/export");
        assert!(element.inner_html().contains("Exporting..."));
        assert!(element.has_attribute("disabled"));
        assert_eq!(element.get_attribute("aria-disabled").as_deref(), Some("true"));

        // A second activation while busy changes nothing
        assert!(workflow.begin(&mut host).is_none());

        host.restore(activation.snapshot());
        assert_eq!(element.inner_html(), before_label, "label of #{}", id);
        assert_eq!(element.get_attribute("disabled"), before_disabled, "disabled of #{}", id);
        assert_eq!(element.get_attribute("aria-disabled"), before_aria, "aria-disabled of #{}", id);
    }

    container.remove();
}

#[wasm_bindgen_test]
fn test_init_export_page_uses_config_overrides() {
    let (_, document) = page();
    let container = append_html(
        &document,
        "<a id=\"api-trigger\" href=\"/reports/api-override-download\">Download</a>",
    );

    let overrides = js_sys::Object::new();
    Reflect::set(&overrides, &"triggerKeyword".into(), &"api-override-download".into()).unwrap();
    Reflect::set(&overrides, &"stylesheetUrl".into(), &"https://example.test/api-override.css".into()).unwrap();

    let status = init_export_page(overrides.into()).unwrap();
    assert_eq!(Reflect::get(&status, &"status".into()).unwrap().as_string().unwrap(), "initialized");
    let report = Reflect::get(&status, &"report".into()).unwrap();
    assert_eq!(Reflect::get(&report, &"triggerAttached".into()).unwrap().as_bool(), Some(true));
    assert_eq!(Reflect::get(&report, &"stylesheetInjected".into()).unwrap().as_bool(), Some(true));
    assert_eq!(count(&document, "link[href=\"https://example.test/api-override.css\"]"), 1);

    // The initializer registers once per page; a second call changes nothing
    let again = init_export_page(JsValue::UNDEFINED).unwrap();
    assert_eq!(Reflect::get(&again, &"status".into()).unwrap().as_string().unwrap(), "alreadyRegistered");
    assert_eq!(count(&document, "link[href=\"https://example.test/api-override.css\"]"), 1);

    container.remove();
}

/// Replace `window.alert` with a recorder; returns the recorded messages
/// and the original function for `restore_alert`
fn record_alerts(window: &Window) -> (js_sys::Array, JsValue) {
    let original = Reflect::get(window, &"alert".into()).unwrap();
    let recorded = js_sys::Array::new();
    Reflect::set(window, &"__recordedAlerts".into(), &recorded).unwrap();
    let recorder = Function::new_with_args("message", "window.__recordedAlerts.push(message);");
    Reflect::set(window, &"alert".into(), &recorder).unwrap();
    (recorded, original)
}

fn restore_alert(window: &Window, original: &JsValue) {
    Reflect::set(window, &"alert".into(), original).unwrap();
    Reflect::delete_property(window, &"__recordedAlerts".into()).unwrap();
}

async fn sleep(window: &Window, ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Wait until the trigger is interactive again
async fn until_settled(window: &Window, element: &HtmlElement) {
    for _ in 0..300 {
        if !element.has_attribute("disabled") {
            return;
        }
        sleep(window, 10).await;
    }
    panic!("export did not settle");
}

fn click(element: &HtmlElement) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    element.dispatch_event(&event).unwrap();
    event
}

fn recorded_strings(recorded: &js_sys::Array) -> Vec<String> {
    recorded.iter().filter_map(|v| v.as_string()).collect()
}

#[wasm_bindgen_test]
async fn test_click_declared_failure_restores_trigger() {
    let (window, document) = page();
    let href = "data:application/json,%7B%22success%22%3Afalse%2C%22message%22%3A%22disk%20full%22%7D";
    let container = append_html(
        &document,
        &format!("<a id=\"click-declined\" href=\"{}\"><b>Export</b></a>", href),
    );
    let element = trigger_element(&document, "click-declined");
    attach(element.clone(), window.clone(), PageConfig::default()).unwrap();
    let (recorded, original_alert) = record_alerts(&window);

    let first = click(&element);
    assert!(first.default_prevented());
    assert!(element.inner_html().contains("Exporting..."));
    assert!(element.has_attribute("disabled"));

    // Second click while the request is pending: no navigation, no new export
    let second = click(&element);
    assert!(second.default_prevented());
    assert!(element.inner_html().contains("Exporting..."));

    until_settled(&window, &element).await;
    let alerts = recorded_strings(&recorded);
    restore_alert(&window, &original_alert);

    assert_eq!(element.inner_html(), "<b>Export</b>");
    assert!(!element.has_attribute("disabled"));
    assert!(!element.has_attribute("aria-disabled"));
    assert_eq!(alerts, vec!["Export failed: disk full".to_string()]);

    container.remove();
}

#[wasm_bindgen_test]
async fn test_click_malformed_body_shows_generic_notice() {
    let (window, document) = page();
    let container = append_html(
        &document,
        "<a id=\"click-malformed\" href=\"data:application/json,not-json\" aria-disabled=\"false\">Export</a>",
    );
    let element = trigger_element(&document, "click-malformed");
    attach(element.clone(), window.clone(), PageConfig::default()).unwrap();
    let (recorded, original_alert) = record_alerts(&window);

    let event = click(&element);
    assert!(event.default_prevented());

    until_settled(&window, &element).await;
    let alerts = recorded_strings(&recorded);
    restore_alert(&window, &original_alert);

    assert_eq!(element.inner_html(), "Export");
    assert_eq!(element.get_attribute("aria-disabled").as_deref(), Some("false"));
    assert_eq!(alerts, vec!["Export failed. Please try again.".to_string()]);

    container.remove();
}

#[wasm_bindgen_test]
fn test_parse_export_response_api() {
    let success = parse_export_response(r#"{"success": true, "filename": "exports/a.xlsx"}"#).unwrap();
    assert_eq!(Reflect::get(&success, &"kind".into()).unwrap().as_string().unwrap(), "success");
    assert_eq!(
        Reflect::get(&success, &"resource".into()).unwrap().as_string().unwrap(),
        "exports/a.xlsx"
    );

    let failure = parse_export_response(r#"{"success": false}"#).unwrap();
    assert_eq!(Reflect::get(&failure, &"kind".into()).unwrap().as_string().unwrap(), "failure");
    assert!(Reflect::get(&failure, &"message".into()).unwrap().is_null());

    assert!(parse_export_response("not json").is_err());
}
