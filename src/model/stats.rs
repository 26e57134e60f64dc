//! View statistics and grouped totals.
//!
//! Summary numbers for the dashboard cards (record counts, active filters,
//! page position) and per-module, per-status and per-month totals for chart
//! views. Everything here is computed from the filtered+sorted set handed in
//! by the caller; nothing is cached.
//!
//! Amount sums saturate at [`Decimal::MAX`] / [`Decimal::MIN`] instead of
//! overflowing.

use crate::model::{Module, Record, Status};
use crate::query::{FilterCriteria, PageMeta};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

// ===== ViewStats =====

/// Headline numbers for the current view.
///
/// # Invariants
///
/// - `view_records <= total_records` when the view was derived from the
///   same source collection
/// - `page` is the clamped page from pagination, `1 <= page <= total_pages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    /// Records in the source collection, before any filter.
    pub total_records: usize,
    /// Records left after filtering.
    pub view_records: usize,
    /// Current page, after clamping.
    pub page: usize,
    /// Page count of the filtered set, at least 1.
    pub total_pages: usize,
    /// Filter predicates currently narrowing the view.
    pub active_filters: usize,
    /// Sum of amounts over the filtered set.
    pub view_amount: Decimal,
}

impl ViewStats {
    /// Compute the numbers for one view.
    pub fn compute(
        total_records: usize,
        view: &[Record],
        meta: &PageMeta,
        criteria: &FilterCriteria,
    ) -> Self {
        Self {
            total_records,
            view_records: view.len(),
            page: meta.page,
            total_pages: meta.total_pages,
            active_filters: criteria.active_filter_count(),
            view_amount: sum_amounts(view),
        }
    }
}

/// Saturating sum of the amounts of `records`.
fn sum_amounts(records: &[Record]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |sum, record| sum.saturating_add(record.amount()))
}

// ===== Grouped totals =====

/// Summed amount and record count for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal<K> {
    /// Group key.
    pub key: K,
    /// Sum of the group's amounts.
    pub amount: Decimal,
    /// Records in the group.
    pub count: usize,
}

/// Group by `key_of`, keeping groups in order of first appearance.
fn group_by<K, F>(records: &[Record], key_of: F) -> Vec<GroupTotal<K>>
where
    K: PartialEq,
    F: Fn(&Record) -> K,
{
    let mut groups: Vec<GroupTotal<K>> = Vec::new();
    for record in records {
        let key = key_of(record);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => {
                group.amount = group.amount.saturating_add(record.amount());
                group.count += 1;
            }
            None => groups.push(GroupTotal {
                key,
                amount: record.amount(),
                count: 1,
            }),
        }
    }
    groups
}

/// Totals per module, in order of first appearance.
pub fn totals_by_module(records: &[Record]) -> Vec<GroupTotal<Module>> {
    group_by(records, Record::module)
}

/// Totals per status, in order of first appearance.
pub fn totals_by_status(records: &[Record]) -> Vec<GroupTotal<Status>> {
    group_by(records, Record::status)
}

/// Calendar month of an effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// Month `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short label such as "Jan 2024".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

/// Totals per effective-date month, in chronological order.
pub fn monthly_totals(records: &[Record]) -> Vec<GroupTotal<MonthKey>> {
    let mut months = group_by(records, |record| MonthKey::of(record.effective_date()));
    months.sort_by_key(|group| group.key);
    months
}
