//! Error types for the recview crate.
//!
//! Each concern owns a `thiserror` enum next to the code that raises it.
//! This module gathers them under [`AppError`] so integration code can
//! compose everything with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping all domain-specific failures
//!   - [`InvalidCriteria`] - Malformed filter input (date bound text)
//!   - [`InvalidSortField`] - Sort field outside the record field set
//!   - [`InvalidPageSize`] - Page size outside the allowed set
//!   - [`ExportError`] - Encoding or file-save/print collaborator failure
//!   - [`SourceError`] - Record collection could not be loaded or validated
//!   - [`ConfigError`] - Configuration file unreadable or invalid
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!
//! # Recovery Strategy
//!
//! - **InvalidCriteria**: recovered locally. The malformed bound is treated
//!   as absent and the error is handed back for display; filtering goes on.
//! - **InvalidSortField / InvalidPageSize**: integration errors. They
//!   propagate to the caller for correction; the engine never substitutes a
//!   fallback field or size.
//! - **ExportError**: caught at the view boundary and reported as a generic
//!   "export failed" notice. View state is left exactly as it was.

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::export::ExportError;
pub use crate::logging::LoggingError;
pub use crate::query::{InvalidCriteria, InvalidPageSize, InvalidSortField};
pub use crate::source::SourceError;

/// Top-level error encompassing all failure modes.
///
/// # Examples
///
/// ```
/// use recview::model::error::AppError;
/// use recview::query::{SortDirection, SortSpec};
///
/// fn parse_sort(field: &str) -> Result<SortSpec, AppError> {
///     Ok(SortSpec::parse(field, SortDirection::Ascending)?)
/// }
///
/// assert!(parse_sort("amount").is_ok());
/// assert!(matches!(parse_sort("balance"), Err(AppError::SortField(_))));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Date bounds could not be parsed.
    #[error("Invalid filter criteria: {0}")]
    Criteria(#[from] InvalidCriteria),

    /// Unknown sort field name.
    #[error(transparent)]
    SortField(#[from] InvalidSortField),

    /// Page size outside the allowed set.
    #[error(transparent)]
    PageSize(#[from] InvalidPageSize),

    /// Encoding or delivering an export failed.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Record data could not be loaded.
    #[error("Failed to load records: {0}")]
    Source(#[from] SourceError),

    /// Config file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}
