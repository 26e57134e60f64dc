//! The full view pipeline: filter, then sort, then paginate.
//!
//! Stages run strictly in sequence and from scratch on every call. The
//! output keeps the whole filtered+sorted set (for stats and export) next to
//! the metadata of the requested page (for display).

use crate::model::Record;
use crate::query::{filter, paginate, sort, FilterCriteria, PageMeta, PageSpec, SortSpec};
use tracing::debug;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult {
    records: Vec<Record>,
    meta: PageMeta,
}

impl ViewResult {
    /// The full filtered+sorted sequence.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records on the requested (clamped) page.
    pub fn page_items(&self) -> &[Record] {
        self.records.get(self.meta.range()).unwrap_or_default()
    }

    /// Metadata of the requested page.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Take the full filtered+sorted sequence.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Run filter → sort → paginate over `records`.
pub fn run(
    records: &[Record],
    criteria: &FilterCriteria,
    sort_spec: &SortSpec,
    page: &PageSpec,
) -> ViewResult {
    let filtered = filter(records, criteria);
    let sorted = sort(&filtered, sort_spec);
    let meta = paginate(&sorted, page.page, page.size.as_nonzero()).meta;

    debug!(
        source = records.len(),
        view = sorted.len(),
        page = meta.page,
        total_pages = meta.total_pages,
        "Recomputed view"
    );

    ViewResult {
        records: sorted,
        meta,
    }
}
