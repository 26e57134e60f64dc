//! Record schema: the typed shape of one business record.
//!
//! Status and module are closed enumerations. Text that does not name one
//! of their members is rejected when the value is constructed, so nothing
//! downstream ever sees a free-text status or category.

use crate::model::identifiers::RecordId;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ===== Status =====

/// Lifecycle status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Awaiting approval.
    Pending,
    /// Approved, not yet paid.
    Approved,
    /// Settled.
    Paid,
    /// Open balance.
    Open,
}

impl Status {
    /// Every status, in the order filter menus list them.
    pub const ALL: [Status; 4] = [Status::Pending, Status::Approved, Status::Paid, Status::Open];

    /// Display label. Also the text used for search and sorting.
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Approved => "APPROVED",
            Status::Paid => "PAID",
            Status::Open => "OPEN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ===== Module =====

/// Business module (category) a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Module {
    /// Accounts payable.
    Payables,
    /// Accounts receivable.
    Receivables,
    /// Purchase orders.
    Procurement,
    /// Stock movements.
    Inventory,
    /// Journal entries.
    #[serde(rename = "General Ledger")]
    GeneralLedger,
    /// Asset purchases and disposals.
    #[serde(rename = "Fixed Assets")]
    FixedAssets,
}

impl Module {
    /// Every module, in the order filter menus list them.
    pub const ALL: [Module; 6] = [
        Module::Payables,
        Module::Receivables,
        Module::Procurement,
        Module::Inventory,
        Module::GeneralLedger,
        Module::FixedAssets,
    ];

    /// Display label. Also the text used for search and sorting.
    pub fn label(self) -> &'static str {
        match self {
            Module::Payables => "Payables",
            Module::Receivables => "Receivables",
            Module::Procurement => "Procurement",
            Module::Inventory => "Inventory",
            Module::GeneralLedger => "General Ledger",
            Module::FixedAssets => "Fixed Assets",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|module| module.label() == s)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

// ===== Record =====

/// Unvalidated record fields, in the shape the record source supplies them.
///
/// Key names follow the source JSON (`invoice_number`, `vendor_name`, ...).
/// Convert with [`Record::new`] to enforce the record invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Unique identifier.
    pub id: RecordId,
    /// Document number, e.g. `INV-001`.
    #[serde(rename = "invoice_number")]
    pub document_number: String,
    /// Counterparty (vendor or customer) name.
    #[serde(rename = "vendor_name")]
    pub counterparty: String,
    /// Document date; the date filters and monthly totals use it.
    #[serde(rename = "invoice_date")]
    pub effective_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Lifecycle status.
    pub status: Status,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Business module.
    pub module: Module,
}

/// One business record (invoice-like transaction).
///
/// Immutable once constructed. Every transformation in the engine produces
/// new sequences of records and never edits one in place.
///
/// # Invariants
///
/// - `updated_at >= created_at`
/// - `status` and `module` are members of their enumerations (by type)
/// - `amount` is finite (by type); its sign is unconstrained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields", into = "RecordFields")]
pub struct Record {
    fields: RecordFields,
}

impl Record {
    /// Smart constructor: validates the timestamp ordering invariant.
    pub fn new(fields: RecordFields) -> Result<Self, RecordError> {
        if fields.updated_at < fields.created_at {
            return Err(RecordError::ModifiedBeforeCreated {
                id: fields.id,
                created_at: fields.created_at,
                updated_at: fields.updated_at,
            });
        }
        Ok(Self { fields })
    }

    /// Unique identifier.
    pub fn id(&self) -> &RecordId {
        &self.fields.id
    }

    /// Document number, e.g. `INV-001`.
    pub fn document_number(&self) -> &str {
        &self.fields.document_number
    }

    /// Counterparty name.
    pub fn counterparty(&self) -> &str {
        &self.fields.counterparty
    }

    /// Document date.
    pub fn effective_date(&self) -> NaiveDate {
        self.fields.effective_date
    }

    /// Payment due date.
    pub fn due_date(&self) -> NaiveDate {
        self.fields.due_date
    }

    /// Signed amount.
    pub fn amount(&self) -> Decimal {
        self.fields.amount
    }

    /// Lifecycle status.
    pub fn status(&self) -> Status {
        self.fields.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.fields.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.fields.updated_at
    }

    /// Business module.
    pub fn module(&self) -> Module {
        self.fields.module
    }

    /// Borrow the underlying field set.
    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }
}

impl TryFrom<RecordFields> for Record {
    type Error = RecordError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<Record> for RecordFields {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Canonical ISO rendering of a record timestamp.
///
/// RFC 3339 with as many fractional digits as the value carries and an
/// explicit `+00:00` offset, e.g. `2025-09-25T07:20:17.234831+00:00`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

// ===== Error Types =====

/// A status label outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown status: {0:?}")]
pub struct UnknownStatus(pub String);

/// A module label outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown module: {0:?}")]
pub struct UnknownModule(pub String);

/// Record construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Last-modified timestamp precedes the creation timestamp.
    #[error("Record {id}: updated_at {updated_at} precedes created_at {created_at}")]
    ModifiedBeforeCreated {
        /// Offending record.
        id: RecordId,
        /// Creation timestamp.
        created_at: DateTime<Utc>,
        /// Modification timestamp, earlier than `created_at`.
        updated_at: DateTime<Utc>,
    },
}
