//! Export trigger workflow
//!
//! - `errors`: failure kinds that end an activation with the generic notice
//! - `workflow`: the busy/settle state machine, independent of the DOM

pub mod errors;
pub mod workflow;

pub use errors::ExportError;
pub use workflow::{Activation, ExportOutcome, ExportWorkflow, TriggerHost};
