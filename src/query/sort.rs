//! Sort engine: type-aware ordering of records by any field.
//!
//! # Stability
//!
//! Sorting is NOT stable. Records that compare equal on the sort field end
//! up adjacent, but their relative order is unspecified and may differ from
//! the input order. Callers that need a deterministic tie order must break
//! ties themselves before or after sorting.

use crate::model::Record;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// A sortable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Record identifier, as text.
    Id,
    /// Document number, case-insensitive.
    DocumentNumber,
    /// Counterparty name, case-insensitive.
    Counterparty,
    /// Effective date, chronological.
    EffectiveDate,
    /// Due date, chronological.
    DueDate,
    /// Amount, numeric.
    Amount,
    /// Status label.
    Status,
    /// Creation timestamp.
    CreatedAt,
    /// Last modification timestamp.
    UpdatedAt,
    /// Module label.
    Module,
}

impl SortField {
    /// Every sortable field, in column order.
    pub const ALL: [SortField; 10] = [
        SortField::Id,
        SortField::DocumentNumber,
        SortField::Counterparty,
        SortField::EffectiveDate,
        SortField::DueDate,
        SortField::Amount,
        SortField::Status,
        SortField::CreatedAt,
        SortField::UpdatedAt,
        SortField::Module,
    ];

    /// Canonical field name.
    pub fn name(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::DocumentNumber => "document_number",
            SortField::Counterparty => "counterparty",
            SortField::EffectiveDate => "effective_date",
            SortField::DueDate => "due_date",
            SortField::Amount => "amount",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Module => "module",
        }
    }

    /// Name of the same field in the source JSON, where it differs.
    fn source_alias(self) -> Option<&'static str> {
        match self {
            SortField::DocumentNumber => Some("invoice_number"),
            SortField::Counterparty => Some("vendor_name"),
            SortField::EffectiveDate => Some("invoice_date"),
            SortField::Module => Some("category"),
            _ => None,
        }
    }

    /// Compare two records on this field, ascending.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortField::Id => cmp_text(a.id().as_str(), b.id().as_str()),
            SortField::DocumentNumber => cmp_text(a.document_number(), b.document_number()),
            SortField::Counterparty => cmp_text(a.counterparty(), b.counterparty()),
            SortField::EffectiveDate => a.effective_date().cmp(&b.effective_date()),
            SortField::DueDate => a.due_date().cmp(&b.due_date()),
            SortField::Amount => a.amount().cmp(&b.amount()),
            SortField::Status => cmp_text(a.status().label(), b.status().label()),
            SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortField::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            SortField::Module => cmp_text(a.module().label(), b.module().label()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = InvalidSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.name() == s || field.source_alias() == Some(s))
            .ok_or_else(|| InvalidSortField(s.to_string()))
    }
}

/// Case-insensitive text comparison: fold, then compare by code point.
fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

// ===== SortSpec =====

/// Sort direction. Defaults to descending, the initial date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Field plus direction. Defaults to effective date, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to order by.
    pub field: SortField,
    /// Order direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Spec for `field` in `direction`.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a field name coming from outside the crate.
    pub fn parse(field: &str, direction: SortDirection) -> Result<Self, InvalidSortField> {
        Ok(Self::new(field.parse()?, direction))
    }

    /// Column-header click: the active field flips direction, any other
    /// field becomes active in ascending order.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    /// Compare two records under this spec.
    ///
    /// Descending negates the field comparison itself rather than reversing
    /// an ascending result afterwards.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.direction.apply(self.field.compare(a, b))
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::EffectiveDate, SortDirection::Descending)
    }
}

/// Return a new sequence ordered by `spec`. The input is left untouched.
///
/// Uses an unstable sort: see the module docs for the tie-order contract.
pub fn sort(records: &[Record], spec: &SortSpec) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_unstable_by(|a, b| spec.compare(a, b));
    debug!(
        count = sorted.len(),
        field = %spec.field,
        direction = ?spec.direction,
        "Sorted records"
    );
    sorted
}

/// A sort field name outside the record's field set.
///
/// This is an integration error: the engine refuses to guess a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort field: {0:?}")]
pub struct InvalidSortField(pub String);
