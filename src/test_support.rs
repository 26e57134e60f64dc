//! Record fixtures shared by the unit tests.

use crate::model::{Module, Record, RecordFields, RecordId, Status};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

/// Build a record with the fields the query engine looks at.
///
/// Due date is thirty days after the effective date; audit timestamps are
/// fixed. Panics on malformed input, which is fine for fixtures.
pub fn record(
    id: &str,
    document_number: &str,
    counterparty: &str,
    effective_date: &str,
    amount: &str,
    status: Status,
    module: Module,
) -> Record {
    let effective_date = NaiveDate::parse_from_str(effective_date, "%Y-%m-%d").unwrap();
    Record::new(RecordFields {
        id: RecordId::new(id).unwrap(),
        document_number: document_number.to_string(),
        counterparty: counterparty.to_string(),
        effective_date,
        due_date: effective_date + chrono::Days::new(30),
        amount: amount.parse::<Decimal>().unwrap(),
        status,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap(),
        module,
    })
    .unwrap()
}

/// The bundled sample set.
pub fn sample() -> Vec<Record> {
    crate::model::sample_records().unwrap()
}

/// Document numbers of a record slice, in order.
pub fn doc_numbers(records: &[Record]) -> Vec<&str> {
    records.iter().map(Record::document_number).collect()
}
