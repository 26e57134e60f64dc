//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod record;
pub mod sample;
pub mod stats;

// Re-export for convenience
pub use identifiers::{InvalidRecordId, RecordId};
pub use record::{
    format_timestamp, Module, Record, RecordError, RecordFields, Status, UnknownModule,
    UnknownStatus,
};
pub use sample::{sample_records, SampleError};
pub use stats::{monthly_totals, totals_by_module, totals_by_status, GroupTotal, MonthKey, ViewStats};
