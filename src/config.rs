//! Page configuration
//!
//! Every constant the export page depends on lives here. The defaults
//! reproduce the stock page; `initExportPage` accepts a partial object
//! (camelCase keys) that overrides individual fields.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIGGER_KEYWORD: &str = "export";
pub const DEFAULT_STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.5.0/font/bootstrap-icons.css";
pub const DEFAULT_TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";
pub const DEFAULT_SPINNER_HTML: &str =
    "<span class=\"spinner-border spinner-border-sm\" role=\"status\" aria-hidden=\"true\"></span>";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Substring of the anchor `href` that marks the export trigger
    pub trigger_keyword: String,
    pub stylesheet_url: String,
    pub tooltip_selector: String,
    pub spinner_html: String,
    pub busy_label: String,
    pub success_message: String,
    /// Prepended to the server's message on a declared failure
    pub failure_prefix: String,
    /// Used when a declared failure carries no message
    pub unknown_error: String,
    /// Shown for transport and parse failures
    pub generic_failure: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            trigger_keyword: DEFAULT_TRIGGER_KEYWORD.to_string(),
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_string(),
            tooltip_selector: DEFAULT_TOOLTIP_SELECTOR.to_string(),
            spinner_html: DEFAULT_SPINNER_HTML.to_string(),
            busy_label: "Exporting...".to_string(),
            success_message: "Data exported successfully!".to_string(),
            failure_prefix: "Export failed: ".to_string(),
            unknown_error: "Unknown error".to_string(),
            generic_failure: "Export failed. Please try again.".to_string(),
        }
    }
}

impl PageConfig {
    /// CSS selector for the first anchor whose href contains the keyword
    pub fn trigger_selector(&self) -> String {
        format!("a[href*=\"{}\"]", self.trigger_keyword.replace('"', "\\\""))
    }

    /// Markup shown inside the trigger while an export is in flight
    pub fn busy_markup(&self) -> String {
        format!("{} {}", self.spinner_html, self.busy_label)
    }

    pub fn declared_failure_notice(&self, message: Option<&str>) -> String {
        format!(
            "{}{}",
            self.failure_prefix,
            message.unwrap_or(&self.unknown_error)
        )
    }
}
