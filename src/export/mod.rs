//! Export serialization of a filtered+sorted record set.
//!
//! Three encoders flatten records into a text payload with a fixed column
//! order. They always receive the full filtered+sorted set, never the raw
//! collection and never just the visible page.
//!
//! | Format            | Columns | Quoting                  | MIME                       |
//! |-------------------|---------|--------------------------|----------------------------|
//! | DelimitedText     | all 9   | counterparty + as needed | `text/csv;charset=utf-8`   |
//! | TabDelimited      | all 9   | none                     | `application/vnd.ms-excel` |
//! | PrintableDocument | 7       | HTML-escaped             | `text/html;charset=utf-8`  |
//!
//! The printable document drops the created/updated timestamps; it is the
//! only encoder with a reduced column set.
//!
//! Encoding is pure. Handing the payload to a file-save or print surface is
//! the job of an [`ExportSink`].

pub mod delimited;
pub mod document;
pub mod sink;

pub use delimited::{DelimitedText, TabDelimited};
pub use document::{format_currency, PrintableDocument};
pub use sink::{DirectorySink, ExportSink};

use crate::model::{format_timestamp, Record};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Column titles shared by the delimited encoders, in output order.
pub const FULL_HEADERS: [&str; 9] = [
    "Invoice Number",
    "Vendor Name",
    "Invoice Date",
    "Due Date",
    "Amount",
    "Status",
    "Created At",
    "Updated At",
    "Module",
];

/// Default document title for printable exports.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Data Management System Export";

/// Default currency symbol for printable exports.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

// ===== Format tag =====

/// The closed set of export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values.
    DelimitedText,
    /// Tab-separated values served as a spreadsheet.
    TabDelimited,
    /// HTML document for printing or saving as PDF.
    PrintableDocument,
}

impl ExportFormat {
    /// Every format, in menu order.
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::DelimitedText,
        ExportFormat::TabDelimited,
        ExportFormat::PrintableDocument,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::DelimitedText => "CSV",
            ExportFormat::TabDelimited => "Excel",
            ExportFormat::PrintableDocument => "PDF",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::DelimitedText => "csv",
            ExportFormat::TabDelimited => "xls",
            ExportFormat::PrintableDocument => "html",
        }
    }

    /// MIME type of the encoded payload.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::DelimitedText => "text/csv;charset=utf-8",
            ExportFormat::TabDelimited => "application/vnd.ms-excel",
            ExportFormat::PrintableDocument => "text/html;charset=utf-8",
        }
    }

    /// Encode `records` with this format's encoder.
    pub fn encode(self, records: &[Record], ctx: &ExportContext) -> Result<String, ExportError> {
        match self {
            ExportFormat::DelimitedText => DelimitedText.encode(records, ctx),
            ExportFormat::TabDelimited => TabDelimited.encode(records, ctx),
            ExportFormat::PrintableDocument => PrintableDocument.encode(records, ctx),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===== Encoding capability =====

/// The single capability every encoder provides.
pub trait Encode {
    /// Encode `records` into the payload body.
    fn encode(&self, records: &[Record], ctx: &ExportContext) -> Result<String, ExportError>;
}

/// Inputs an encoder needs besides the records.
///
/// The generation timestamp is passed in so that encoding stays a pure
/// function of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    /// Instant printed in the document and used for the filename.
    pub generated_at: DateTime<Utc>,
    /// Document heading.
    pub title: String,
    /// Prefix for formatted amounts.
    pub currency_symbol: String,
}

impl ExportContext {
    /// Context with the default title and currency symbol.
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Override the document heading.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    /// Override the currency symbol.
    pub fn with_currency_symbol(self, currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            ..self
        }
    }
}

/// All nine columns of a record, as text, in [`FULL_HEADERS`] order.
pub(crate) fn full_row(record: &Record) -> [String; 9] {
    [
        record.document_number().to_string(),
        record.counterparty().to_string(),
        record.effective_date().to_string(),
        record.due_date().to_string(),
        record.amount().normalize().to_string(),
        record.status().label().to_string(),
        format_timestamp(record.created_at()),
        format_timestamp(record.updated_at()),
        record.module().label().to_string(),
    ]
}

// ===== Payload =====

/// An encoded export ready for a file-save or print collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    /// Format the body was encoded with.
    pub format: ExportFormat,
    /// Suggested filename, including the extension.
    pub filename: String,
    /// MIME type for the save surface.
    pub mime_type: &'static str,
    /// Encoded text.
    pub body: String,
}

/// `data-export-YYYY-MM-DDTHH-MM-SS.<ext>` for the given instant.
pub fn default_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "data-export-{}.{}",
        at.format("%Y-%m-%dT%H-%M-%S"),
        format.extension()
    )
}

/// Encode `records` and wrap them in a payload.
///
/// `filename` defaults to [`default_filename`] at `ctx.generated_at`.
pub fn export(
    format: ExportFormat,
    records: &[Record],
    filename: Option<&str>,
    ctx: &ExportContext,
) -> Result<ExportPayload, ExportError> {
    let body = format.encode(records, ctx)?;
    let filename = filename
        .map(str::to_string)
        .unwrap_or_else(|| default_filename(format, ctx.generated_at));
    debug!(
        format = %format,
        records = records.len(),
        bytes = body.len(),
        filename = %filename,
        "Encoded export payload"
    );
    Ok(ExportPayload {
        format,
        filename,
        mime_type: format.mime_type(),
        body,
    })
}

/// Delimited-text (CSV) export entry point.
pub fn export_csv(
    records: &[Record],
    filename: Option<&str>,
    ctx: &ExportContext,
) -> Result<ExportPayload, ExportError> {
    export(ExportFormat::DelimitedText, records, filename, ctx)
}

/// Tab-delimited (spreadsheet) export entry point.
pub fn export_tsv(
    records: &[Record],
    filename: Option<&str>,
    ctx: &ExportContext,
) -> Result<ExportPayload, ExportError> {
    export(ExportFormat::TabDelimited, records, filename, ctx)
}

/// Printable document export entry point.
pub fn export_document(
    records: &[Record],
    filename: Option<&str>,
    ctx: &ExportContext,
) -> Result<ExportPayload, ExportError> {
    export(ExportFormat::PrintableDocument, records, filename, ctx)
}

// ===== Errors =====

/// Export failures.
///
/// Encoding into memory does not fail on well-formed records; the
/// `Encode`/`Format`/`Utf8` variants exist because the underlying writers
/// report errors through `Result`. Real failures come from the sink.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The delimited writer rejected a row.
    #[error("Failed to encode export: {0}")]
    Encode(#[from] csv::Error),

    /// Writing the printable document failed.
    #[error("Failed to render export document: {0}")]
    Format(#[from] fmt::Error),

    /// The delimited writer produced invalid UTF-8.
    #[error("Export payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The filename would escape the target directory.
    #[error("Invalid export filename: {0:?}")]
    InvalidFilename(String),

    /// The file-save collaborator could not write the payload.
    #[error("Failed to write export to {path}: {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The print/save surface refused the payload (e.g. popup blocked).
    #[error("Export target unavailable: {0}")]
    Unavailable(String),
}
