//! Record browser view controller.
//!
//! Owns the UI-facing state (criteria, sort spec, page, page size) and
//! re-runs the whole pipeline after every change. There is no incremental
//! recomputation: the current [`ViewResult`] is always the output of
//! [`pipeline::run`] over the current state.
//!
//! Page policy:
//! - criteria, sort and page-size changes go back to page 1
//! - a requested page outside `1..=total_pages` is clamped

use crate::config::ResolvedConfig;
use crate::export::{
    self, ExportContext, ExportError, ExportFormat, ExportPayload, ExportSink,
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_DOCUMENT_TITLE,
};
use crate::model::{Module, Record, Status, ViewStats};
use crate::pipeline::{self, ViewResult};
use crate::query::{
    FilterCriteria, InvalidCriteria, InvalidSortField, PageSize, PageSpec, Selector, SortField,
    SortSpec,
};
use crate::source::RecordSet;
use chrono::{DateTime, Utc};
use tracing::{error, info};

// ===== ExportNotice =====

/// User-facing outcome of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportNotice {
    /// The payload reached the sink.
    Succeeded {
        /// Format that was exported.
        format: ExportFormat,
        /// Filename handed to the sink.
        filename: String,
    },
    /// Details are in the log, not in the notice.
    Failed,
}

impl ExportNotice {
    /// True for [`ExportNotice::Succeeded`].
    pub fn is_success(&self) -> bool {
        matches!(self, ExportNotice::Succeeded { .. })
    }

    /// Toast title.
    pub fn title(&self) -> &'static str {
        match self {
            ExportNotice::Succeeded { .. } => "Export successful",
            ExportNotice::Failed => "Export failed",
        }
    }

    /// Toast body.
    pub fn description(&self) -> String {
        match self {
            ExportNotice::Succeeded { format, .. } => {
                format!("Data exported as {} format.", format.label().to_uppercase())
            }
            ExportNotice::Failed => "There was an error exporting the data.".to_string(),
        }
    }
}

// ===== RecordBrowser =====

/// Interactive state over one immutable record collection.
#[derive(Debug, Clone)]
pub struct RecordBrowser {
    records: RecordSet,
    criteria: FilterCriteria,
    sort: SortSpec,
    page: PageSpec,
    document_title: String,
    currency_symbol: String,
    view: ViewResult,
}

impl RecordBrowser {
    /// Browser with default criteria and sort, on page 1.
    pub fn new(records: RecordSet, page_size: PageSize) -> Self {
        let criteria = FilterCriteria::default();
        let sort = SortSpec::default();
        let page = PageSpec::first(page_size);
        let view = pipeline::run(records.records(), &criteria, &sort, &page);
        Self {
            records,
            criteria,
            sort,
            page,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            view,
        }
    }

    /// Browser using the page size and export settings of `config`.
    pub fn from_config(records: RecordSet, config: &ResolvedConfig) -> Self {
        let mut browser = Self::new(records, config.page_size);
        browser.document_title = config.document_title.clone();
        browser.currency_symbol = config.currency_symbol.clone();
        browser
    }

    // ===== Accessors =====

    /// The unfiltered collection, in source order.
    pub fn source(&self) -> &[Record] {
        self.records.records()
    }

    /// Active filter selections.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Active sort.
    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    /// Current page and page size. The page is always the clamped one.
    pub fn page_spec(&self) -> PageSpec {
        self.page
    }

    /// Output of the latest pipeline run.
    pub fn view(&self) -> &ViewResult {
        &self.view
    }

    /// Records on the current page.
    pub fn page_items(&self) -> &[Record] {
        self.view.page_items()
    }

    /// Headline numbers for the current view.
    pub fn stats(&self) -> ViewStats {
        ViewStats::compute(
            self.records.len(),
            self.view.records(),
            self.view.meta(),
            &self.criteria,
        )
    }

    // ===== Criteria =====

    /// Change the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.update_criteria(|c| c.with_search(term));
    }

    /// Change the module selection.
    pub fn set_module(&mut self, module: Selector<Module>) {
        self.update_criteria(|c| c.with_module(module));
    }

    /// Change the status selection.
    pub fn set_status(&mut self, status: Selector<Status>) {
        self.update_criteria(|c| c.with_status(status));
    }

    /// Set both date bounds from raw text.
    ///
    /// Malformed bounds are left out of the criteria and returned so they
    /// can be shown next to the inputs.
    pub fn set_date_bounds(&mut self, from: &str, to: &str) -> Vec<InvalidCriteria> {
        let (criteria, errors) = self.criteria.clone().with_date_bounds_lenient(from, to);
        self.criteria = criteria;
        self.restart();
        errors
    }

    /// Reset every filter.
    pub fn clear_filters(&mut self) {
        self.update_criteria(FilterCriteria::cleared);
    }

    fn update_criteria(&mut self, f: impl FnOnce(FilterCriteria) -> FilterCriteria) {
        self.criteria = f(std::mem::take(&mut self.criteria));
        self.restart();
    }

    // ===== Sort =====

    /// Column-header click: same field flips direction, a new field starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggled(field);
        self.restart();
    }

    /// [`toggle_sort`](Self::toggle_sort) by field name.
    pub fn toggle_sort_by_name(&mut self, name: &str) -> Result<(), InvalidSortField> {
        let field: SortField = name.parse()?;
        self.toggle_sort(field);
        Ok(())
    }

    /// Replace the sort outright.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = spec;
        self.restart();
    }

    // ===== Paging =====

    /// Jump to `page`; out-of-range pages are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.page.page = page;
        self.recompute();
    }

    /// Go forward one page, if there is one.
    pub fn next_page(&mut self) {
        if self.view.meta().has_next() {
            self.set_page(self.page.page + 1);
        }
    }

    /// Go back one page, if there is one.
    pub fn previous_page(&mut self) {
        if self.view.meta().has_previous() {
            self.set_page(self.page.page - 1);
        }
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.size = size;
        self.restart();
    }

    // ===== Recompute =====

    fn restart(&mut self) {
        self.page.page = 1;
        self.recompute();
    }

    /// Re-run filter → sort → paginate and store the clamped page.
    pub fn recompute(&mut self) -> &ViewResult {
        self.view = pipeline::run(self.records.records(), &self.criteria, &self.sort, &self.page);
        self.page.page = self.view.meta().page;
        &self.view
    }

    // ===== Export =====

    fn export_context(&self, now: DateTime<Utc>) -> ExportContext {
        ExportContext::new(now)
            .with_title(self.document_title.clone())
            .with_currency_symbol(self.currency_symbol.clone())
    }

    /// Encode the full filtered+sorted view (never just the page) and hand
    /// it to `sink`.
    pub fn try_export(
        &self,
        format: ExportFormat,
        sink: &dyn ExportSink,
        now: DateTime<Utc>,
    ) -> Result<ExportPayload, ExportError> {
        let payload = export::export(
            format,
            self.view.records(),
            None,
            &self.export_context(now),
        )?;
        sink.deliver(&payload)?;
        Ok(payload)
    }

    /// [`try_export`](Self::try_export), with the outcome reduced to a
    /// notice. Browser state is unchanged either way.
    pub fn export(
        &self,
        format: ExportFormat,
        sink: &dyn ExportSink,
        now: DateTime<Utc>,
    ) -> ExportNotice {
        match self.try_export(format, sink, now) {
            Ok(payload) => {
                info!(format = %format, filename = %payload.filename, "Export delivered");
                ExportNotice::Succeeded {
                    format,
                    filename: payload.filename,
                }
            }
            Err(e) => {
                error!(format = %format, error = %e, "Export failed");
                ExportNotice::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
