//! Busy/settle state machine for the export trigger
//!
//! An activation runs in two synchronous halves around the network call:
//!
//! 1. `begin` snapshots the trigger, swaps in the busy markup and disables it.
//! 2. `settle` interprets the response body, starts the download or notifies,
//!    and restores the snapshot.
//!
//! `Activation` is not `Clone`, and `settle` takes it by value, so each
//! snapshot is restored exactly once. While an activation is outstanding the
//! workflow is busy and further `begin` calls return `None`.

use crate::config::PageConfig;
use crate::models::{ExportResponse, TriggerSnapshot};

use super::errors::ExportError;

/// The trigger element and the page services it drives
pub trait TriggerHost {
    /// Navigation target of the trigger
    fn target(&self) -> String;
    /// Current display content and interactive state
    fn snapshot(&self) -> TriggerSnapshot;
    /// Replace the content with `markup` and make the trigger non-interactive
    fn show_busy(&mut self, markup: &str);
    /// Put back exactly what `snapshot` recorded
    fn restore(&mut self, snapshot: &TriggerSnapshot);
    /// Hand `resource` to the browser's native download handling
    fn start_download(&mut self, resource: &str) -> Result<(), ExportError>;
    /// Blocking user-facing notification
    fn notify(&mut self, message: &str);
}

/// An export in flight
#[derive(Debug)]
pub struct Activation {
    target: String,
    snapshot: TriggerSnapshot,
}

impl Activation {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn snapshot(&self) -> &TriggerSnapshot {
        &self.snapshot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Downloaded { resource: String },
    Declined { message: Option<String> },
    Failed(ExportError),
}

#[derive(Debug)]
pub struct ExportWorkflow {
    config: PageConfig,
    busy: bool,
}

impl ExportWorkflow {
    pub fn new(config: PageConfig) -> Self {
        Self { config, busy: false }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Enter the busy state, or `None` if an export is already in flight
    pub fn begin<H: TriggerHost>(&mut self, host: &mut H) -> Option<Activation> {
        if self.busy {
            log::debug!("Export already in progress, ignoring activation");
            return None;
        }

        let target = host.target();
        let snapshot = host.snapshot();

        host.show_busy(&self.config.busy_markup());
        self.busy = true;

        log::info!("Export started: {}", target);
        Some(Activation { target, snapshot })
    }

    /// Consume the response of `activation` and restore the trigger
    pub fn settle<H: TriggerHost>(
        &mut self,
        activation: Activation,
        body: Result<String, ExportError>,
        host: &mut H,
    ) -> ExportOutcome {
        let outcome = self.deliver(body, host);

        host.restore(&activation.snapshot);
        self.busy = false;

        outcome
    }

    fn deliver<H: TriggerHost>(&self, body: Result<String, ExportError>, host: &mut H) -> ExportOutcome {
        let response = body.and_then(|text| ExportResponse::from_json(&text));

        let outcome = match response {
            Ok(ExportResponse::Success { resource }) => match host.start_download(&resource) {
                Ok(()) => {
                    host.notify(&self.config.success_message);
                    ExportOutcome::Downloaded { resource }
                }
                Err(err) => ExportOutcome::Failed(err),
            },
            Ok(ExportResponse::Failure { message }) => {
                host.notify(&self.config.declared_failure_notice(message.as_deref()));
                ExportOutcome::Declined { message }
            }
            Err(err) => ExportOutcome::Failed(err),
        };

        if let ExportOutcome::Failed(err) = &outcome {
            log::error!("Export error: {}", err);
            host.notify(&self.config.generic_failure);
        }

        outcome
    }
}
