//! Query engine: narrows a record sequence by search term and field filters.
//!
//! All predicates are ANDed. The input order is preserved and no record is
//! duplicated or modified.

use crate::model::{Module, Record, Status};
use chrono::{DateTime, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

// ===== Selector =====

/// Enumeration filter: either everything or exactly one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector<T> {
    /// No narrowing.
    #[default]
    All,
    /// Exactly this member.
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    /// Whether `value` passes this selector. Exact enumeration match.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    /// True for [`Selector::All`].
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: FromStr> Selector<T> {
    /// Parse a menu label.
    ///
    /// "all", "All Modules" and "All Status" (any case) select everything.
    /// Any other text must name an enumeration member exactly.
    pub fn parse(raw: &str) -> Result<Self, T::Err> {
        let lower = raw.trim().to_lowercase();
        if lower == "all" || lower == "all modules" || lower == "all status" {
            return Ok(Selector::All);
        }
        raw.trim().parse().map(Selector::Only)
    }
}

// ===== FilterCriteria =====

/// The combined set of active filter selections.
///
/// A value object: every `with_*` method consumes the criteria and returns
/// a new value, so a change always produces a fresh criteria for the next
/// recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    search: String,
    module: Selector<Module>,
    status: Selector<Status>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria that admit every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search term; blank means no search.
    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..self
        }
    }

    /// Module selection.
    pub fn with_module(self, module: Selector<Module>) -> Self {
        Self { module, ..self }
    }

    /// Status selection.
    pub fn with_status(self, status: Selector<Status>) -> Self {
        Self { status, ..self }
    }

    /// Inclusive lower bound on the effective date.
    pub fn with_date_from(self, date_from: Option<NaiveDate>) -> Self {
        Self { date_from, ..self }
    }

    /// Inclusive upper bound on the effective date.
    pub fn with_date_to(self, date_to: Option<NaiveDate>) -> Self {
        Self { date_to, ..self }
    }

    /// Apply date bounds given as text, tolerating malformed input.
    ///
    /// A bound that fails to parse is treated as absent. The parse failures
    /// are returned so the caller can show a validation message; filtering
    /// itself never fails because of them.
    pub fn with_date_bounds_lenient(self, from: &str, to: &str) -> (Self, Vec<InvalidCriteria>) {
        let mut errors = Vec::new();
        let mut resolve = |raw: &str, side: BoundSide| match parse_date_bound(raw, side) {
            Ok(bound) => bound,
            Err(err) => {
                warn!(error = %err, "Ignoring malformed date bound");
                errors.push(err);
                None
            }
        };
        let date_from = resolve(from, BoundSide::Lower);
        let date_to = resolve(to, BoundSide::Upper);
        (
            Self {
                date_from,
                date_to,
                ..self
            },
            errors,
        )
    }

    /// Reset every selection to its default.
    pub fn cleared(self) -> Self {
        Self::default()
    }

    /// Current search term, as entered.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current module selection.
    pub fn module(&self) -> Selector<Module> {
        self.module
    }

    /// Current status selection.
    pub fn status(&self) -> Selector<Status> {
        self.status
    }

    /// Inclusive lower date bound.
    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Inclusive upper date bound.
    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// True when no predicate narrows the set.
    pub fn is_default(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of predicates currently narrowing the set.
    ///
    /// Each date bound counts on its own.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.module.is_all(),
            !self.status.is_all(),
            self.date_from.is_some(),
            self.date_to.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &Record) -> bool {
        Matcher::new(self).matches(record)
    }
}

/// Criteria with the search term folded once for a whole pass.
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    needle: String,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria.search.to_lowercase(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self.criteria.module.admits(&record.module())
            && self.criteria.status.admits(&record.status())
            && self.matches_date(record.effective_date())
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [
            record.document_number(),
            record.counterparty(),
            record.status().label(),
            record.module().label(),
        ]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&self.needle))
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        let after_lower = self.criteria.date_from.is_none_or(|from| date >= from);
        let before_upper = self.criteria.date_to.is_none_or(|to| date <= to);
        after_lower && before_upper
    }
}

// ===== Filtering =====

/// Narrow `records` to those passing every predicate in `criteria`.
///
/// Input order is preserved. Default criteria return the input unchanged.
/// A lower bound after the upper bound yields an empty result.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    if criteria.is_default() {
        return records.to_vec();
    }

    let matcher = Matcher::new(criteria);
    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| matcher.matches(record))
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        output = filtered.len(),
        active_filters = criteria.active_filter_count(),
        "Filtered records"
    );
    filtered
}

// ===== Date bounds =====

/// Which end of the date range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    /// "From" bound.
    Lower,
    /// "To" bound.
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Lower => f.write_str("lower"),
            BoundSide::Upper => f.write_str("upper"),
        }
    }
}

/// Parse a date bound typed or picked by the user.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, of which only the date is
/// kept (bounds compare at day granularity). Blank text means "no bound".
pub fn parse_date_bound(raw: &str, side: BoundSide) -> Result<Option<NaiveDate>, InvalidCriteria> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| InvalidCriteria::MalformedDateBound {
            side,
            raw: raw.to_string(),
        })
}

/// Filter criteria that could not be interpreted.
///
/// Recovered locally: the offending bound is dropped and filtering goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCriteria {
    /// A date bound is neither `YYYY-MM-DD` nor RFC 3339.
    #[error("Malformed {side} date bound: {raw:?}")]
    MalformedDateBound {
        /// Which bound was malformed.
        side: BoundSide,
        /// The raw, unparsed bound text.
        raw: String,
    },
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
