//! Scenario tests over the ten-record sample set.
//!
//! Module mix: Payables×3, Receivables×2, Procurement×2, General Ledger×1,
//! Fixed Assets×1, Inventory×1.

use crate::export::{export_csv, ExportContext};
use crate::model::{Module, Record};
use crate::pipeline;
use crate::query::{
    filter, paginate, sort, FilterCriteria, PageSize, PageSpec, Selector, SortDirection,
    SortField, SortSpec,
};
use crate::test_support::{doc_numbers, sample};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::num::NonZeroUsize;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn sample_module_mix() {
    let records = sample();
    let mut counts: HashMap<Module, usize> = HashMap::new();
    for r in &records {
        *counts.entry(r.module()).or_default() += 1;
    }
    assert_eq!(records.len(), 10);
    assert_eq!(counts[&Module::Payables], 3);
    assert_eq!(counts[&Module::Receivables], 2);
    assert_eq!(counts[&Module::Procurement], 2);
    assert_eq!(counts[&Module::GeneralLedger], 1);
    assert_eq!(counts[&Module::FixedAssets], 1);
    assert_eq!(counts[&Module::Inventory], 1);
}

#[test]
fn payables_filter_returns_exactly_three() {
    let records = sample();
    let criteria = FilterCriteria::new().with_module(Selector::Only(Module::Payables));
    let view = filter(&records, &criteria);
    assert_eq!(view.len(), 3);
    assert!(view.iter().all(|r| r.module() == Module::Payables));
}

#[test]
fn inv_prefix_search_matches_only_inv_documents() {
    let records = sample();
    let view = filter(&records, &FilterCriteria::new().with_search("INV-00"));
    assert!(view.iter().all(|r| r.document_number().starts_with("INV-00")));
    assert_eq!(
        doc_numbers(&view),
        vec!["INV-001", "INV-002", "INV-003", "INV-004", "INV-005", "INV-006"]
    );
}

#[test]
fn amount_descending_spans_max_to_min() {
    let records = sample();
    let sorted = sort(
        &records,
        &SortSpec::new(SortField::Amount, SortDirection::Descending),
    );
    assert_eq!(sorted.len(), 10);
    assert_eq!(sorted.first().map(Record::amount).unwrap().to_string(), "25000");
    assert_eq!(sorted.last().map(Record::amount).unwrap().to_string(), "425.75");
}

#[test]
fn ten_records_fit_one_page_of_ten() {
    let records = sample();
    let sorted = sort(
        &records,
        &SortSpec::new(SortField::Amount, SortDirection::Descending),
    );
    let page = paginate(&sorted, 1, size(10));
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.meta.total_pages, 1);
    assert_eq!(page.meta.start_index, 1);
    assert_eq!(page.meta.end_index, 10);
}

#[test]
fn fourth_page_of_three_holds_the_last_record() {
    let records = sample();
    let page = paginate(&records, 4, size(3));
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.meta.total_pages, 4);
    assert_eq!(page.meta.start_index, 10);
    assert_eq!(page.meta.end_index, 10);
}

#[test]
fn export_ignores_pagination() {
    let records = sample();
    let criteria = FilterCriteria::new().with_search("inv");
    let page = PageSpec::new(1, PageSize::new(10).unwrap());
    let view = pipeline::run(&records, &criteria, &SortSpec::default(), &page);

    let ctx = ExportContext::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let payload = export_csv(view.records(), None, &ctx).unwrap();

    assert_eq!(payload.filename, "data-export-2024-01-01T00-00-00.csv");
    assert_eq!(payload.body.lines().count(), view.records().len() + 1);
}

#[test]
fn pipeline_leaves_source_untouched() {
    let records = sample();
    let before = records.clone();
    let criteria = FilterCriteria::new().with_module(Selector::Only(Module::Receivables));
    let spec = SortSpec::new(SortField::Counterparty, SortDirection::Ascending);
    let _ = pipeline::run(&records, &criteria, &spec, &PageSpec::default());
    assert_eq!(records, before);
}
