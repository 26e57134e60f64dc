//! Snapshot tests for grouped totals and headline stats.

use crate::model::{monthly_totals, totals_by_module, totals_by_status, GroupTotal, ViewStats};
use crate::query::{filter, paginate, FilterCriteria, PageSize};
use crate::test_support::sample;

fn render<K>(groups: &[GroupTotal<K>], label: impl Fn(&K) -> String) -> String {
    groups
        .iter()
        .map(|g| format!("{} | {:.2} | {}", label(&g.key), g.amount, g.count))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn module_totals_over_sample() {
    let out = render(&totals_by_module(&sample()), |m| m.label().to_string());
    insta::assert_snapshot!(out, @r"
    Payables | 9450.50 | 3
    Receivables | 7700.00 | 2
    Procurement | 9175.75 | 2
    General Ledger | 12000.00 | 1
    Fixed Assets | 25000.00 | 1
    Inventory | 1875.25 | 1
    ");
}

#[test]
fn status_totals_over_sample() {
    let out = render(&totals_by_status(&sample()), |s| s.label().to_string());
    insta::assert_snapshot!(out, @r"
    PENDING | 3801.00 | 3
    APPROVED | 23500.50 | 3
    PAID | 30200.00 | 2
    OPEN | 7700.00 | 2
    ");
}

#[test]
fn monthly_totals_over_sample() {
    let out = render(&monthly_totals(&sample()), |k| k.label());
    insta::assert_snapshot!(out, @r"
    Jan 2024 | 21400.50 | 5
    Feb 2024 | 43801.00 | 5
    ");
}

#[test]
fn headline_stats_for_search() {
    let records = sample();
    let criteria = FilterCriteria::new().with_search("pending");
    let view = filter(&records, &criteria);
    let page = paginate(&view, 1, PageSize::default().as_nonzero());

    let stats = ViewStats::compute(records.len(), &view, &page.meta, &criteria);

    assert_eq!(stats.total_records, 10);
    assert_eq!(stats.view_records, 3);
    assert_eq!(stats.page, 1);
    assert_eq!(stats.total_pages, 1);
    assert_eq!(stats.active_filters, 1);
    assert_eq!(format!("{:.2}", stats.view_amount), "3801.00");
}
