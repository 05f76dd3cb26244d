//! Trigger element snapshot

/// Display content and interactive state captured at activation
///
/// Attributes are recorded with their exact values (`None` when absent) so
/// restoring puts the trigger back exactly as it was before the click,
/// whatever the outcome of the export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerSnapshot {
    pub label: String,
    /// Value of the `disabled` attribute
    pub disabled: Option<String>,
    /// Value of the `aria-disabled` attribute
    pub aria_disabled: Option<String>,
}

