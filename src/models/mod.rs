//! Models module for the export page
//!
//! Transient data only: the parsed export response and the trigger
//! snapshot taken at activation.

pub mod response;
pub mod serde_helpers;
pub mod trigger;

// Re-export commonly used types
pub use response::ExportResponse;
pub use trigger::TriggerSnapshot;
