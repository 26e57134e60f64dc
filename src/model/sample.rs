//! Bundled sample data set.
//!
//! Ten invoice-like records spread over every business module. Used by the
//! scenario tests and the benchmarks, and handy as demo data for a view
//! layer that has no record source wired up yet.

use crate::model::identifiers::RecordId;
use crate::model::record::{Module, Record, RecordError, RecordFields, Status};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Audit timestamp shared by every sample record.
const SAMPLE_AUDIT_TS: &str = "2025-09-25T07:20:17.234831+00:00";

struct SampleRow {
    id: &'static str,
    document_number: &'static str,
    counterparty: &'static str,
    effective_date: (i32, u32, u32),
    due_date: (i32, u32, u32),
    /// Amount as (mantissa, scale).
    amount: (i64, u32),
    status: Status,
    module: Module,
}

const SAMPLE_ROWS: [SampleRow; 10] = [
    SampleRow {
        id: "1",
        document_number: "INV-001",
        counterparty: "ABC Supplies Inc",
        effective_date: (2024, 1, 15),
        due_date: (2024, 2, 15),
        amount: (1500, 0),
        status: Status::Pending,
        module: Module::Payables,
    },
    SampleRow {
        id: "2",
        document_number: "INV-002",
        counterparty: "XYZ Services Ltd",
        effective_date: (2024, 1, 20),
        due_date: (2024, 2, 20),
        amount: (27505, 1),
        status: Status::Approved,
        module: Module::Payables,
    },
    SampleRow {
        id: "3",
        document_number: "INV-003",
        counterparty: "Tech Solutions Corp",
        effective_date: (2024, 1, 25),
        due_date: (2024, 2, 25),
        amount: (5200, 0),
        status: Status::Paid,
        module: Module::Payables,
    },
    SampleRow {
        id: "4",
        document_number: "AR-001",
        counterparty: "-",
        effective_date: (2024, 1, 10),
        due_date: (2024, 2, 10),
        amount: (3200, 0),
        status: Status::Open,
        module: Module::Receivables,
    },
    SampleRow {
        id: "5",
        document_number: "PO-001",
        counterparty: "Industrial Supplies Co",
        effective_date: (2024, 1, 12),
        due_date: (2024, 2, 12),
        amount: (8750, 0),
        status: Status::Approved,
        module: Module::Procurement,
    },
    SampleRow {
        id: "6",
        document_number: "INV-004",
        counterparty: "Office Depot LLC",
        effective_date: (2024, 2, 1),
        due_date: (2024, 3, 1),
        amount: (42575, 2),
        status: Status::Pending,
        module: Module::Procurement,
    },
    SampleRow {
        id: "7",
        document_number: "INV-005",
        counterparty: "Software Solutions Inc",
        effective_date: (2024, 2, 5),
        due_date: (2024, 3, 5),
        amount: (12000, 0),
        status: Status::Approved,
        module: Module::GeneralLedger,
    },
    SampleRow {
        id: "8",
        document_number: "FA-001",
        counterparty: "Equipment Leasing Corp",
        effective_date: (2024, 2, 10),
        due_date: (2024, 3, 10),
        amount: (25000, 0),
        status: Status::Paid,
        module: Module::FixedAssets,
    },
    SampleRow {
        id: "9",
        document_number: "INV-006",
        counterparty: "Maintenance Co",
        effective_date: (2024, 2, 15),
        due_date: (2024, 3, 15),
        amount: (187525, 2),
        status: Status::Pending,
        module: Module::Inventory,
    },
    SampleRow {
        id: "10",
        document_number: "AR-002",
        counterparty: "Client Services Ltd",
        effective_date: (2024, 2, 20),
        due_date: (2024, 3, 20),
        amount: (4500, 0),
        status: Status::Open,
        module: Module::Receivables,
    },
];

/// Build the sample record set.
///
/// The rows are compile-time constants, so construction only fails if the
/// table itself is edited into an invalid state; that surfaces as an error
/// instead of a panic.
pub fn sample_records() -> Result<Vec<Record>, SampleError> {
    let audit_ts = DateTime::parse_from_rfc3339(SAMPLE_AUDIT_TS)
        .map_err(|_| SampleError::InvalidRow("audit timestamp"))?
        .with_timezone(&Utc);

    SAMPLE_ROWS
        .iter()
        .map(|row| -> Result<Record, SampleError> {
            let fields = RecordFields {
                id: RecordId::new(row.id).map_err(|_| SampleError::InvalidRow(row.id))?,
                document_number: row.document_number.to_string(),
                counterparty: row.counterparty.to_string(),
                effective_date: ymd(row.effective_date).ok_or(SampleError::InvalidRow(row.id))?,
                due_date: ymd(row.due_date).ok_or(SampleError::InvalidRow(row.id))?,
                amount: Decimal::new(row.amount.0, row.amount.1),
                status: row.status,
                created_at: audit_ts,
                updated_at: audit_ts,
                module: row.module,
            };
            Ok(Record::new(fields)?)
        })
        .collect()
}

fn ymd((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The sample table contains an unusable row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// A row holds a value that does not parse.
    #[error("Invalid sample row: {0}")]
    InvalidRow(&'static str),
    /// A row breaks a record invariant.
    #[error(transparent)]
    Record(#[from] RecordError),
}
