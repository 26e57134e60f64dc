//! View-controller state.
//!
//! The only stateful layer. It owns user selections and delegates every
//! derived value to the pure pipeline.

pub mod browser;

// Re-export for convenience
pub use browser::{ExportNotice, RecordBrowser};
