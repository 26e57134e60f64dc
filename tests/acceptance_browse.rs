//! Acceptance tests: load a record file, browse it, export the view.
//!
//! Each test drives the public API the way an embedding UI would:
//! GIVEN a record file and a resolved config, WHEN the user narrows, sorts,
//! pages and exports, THEN the view and the written files reflect it.

use chrono::{TimeZone, Utc};
use recview::config::{merge_config, ConfigFile, ResolvedConfig};
use recview::export::{DirectorySink, ExportFormat};
use recview::model::{sample_records, Module, Status};
use recview::query::{PageSize, Selector, SortField};
use recview::source::load_file;
use recview::state::{ExportNotice, RecordBrowser};
use std::fs;
use std::path::Path;

fn write_sample_json(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("records.json");
    let json = serde_json::to_string_pretty(&sample_records().unwrap()).unwrap();
    fs::write(&path, json).unwrap();
    path
}

fn config_for(export_dir: &Path) -> ResolvedConfig {
    merge_config(Some(ConfigFile {
        export_dir: Some(export_dir.to_path_buf()),
        page_size: Some(PageSize::new(10).unwrap()),
        ..ConfigFile::default()
    }))
}

#[test]
fn browse_payables_and_export_csv() {
    // GIVEN the sample set saved as JSON
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_json(dir.path());
    let report = load_file(&path).unwrap();
    assert!(report.skipped.is_empty());

    let config = config_for(&dir.path().join("exports"));
    let mut browser = RecordBrowser::from_config(report.records, &config);

    // WHEN narrowing to Payables and sorting by amount, largest first
    browser.set_module(Selector::Only(Module::Payables));
    browser.toggle_sort(SortField::Amount);
    browser.toggle_sort(SortField::Amount);

    // THEN three records show, largest first
    let docs: Vec<_> = browser
        .page_items()
        .iter()
        .map(|r| r.document_number())
        .collect();
    assert_eq!(docs, vec!["INV-003", "INV-002", "INV-001"]);

    // WHEN exporting
    let sink = DirectorySink::new(&config.export_dir);
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();
    let notice = browser.export(ExportFormat::DelimitedText, &sink, at);

    // THEN the file holds the same three rows in the same order
    assert!(notice.is_success(), "{}", notice.description());
    let written = fs::read_to_string(
        config
            .export_dir
            .join("data-export-2024-04-01T08-30-00.csv"),
    )
    .unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("INV-003,\"Tech Solutions Corp\","));
    assert!(lines[3].starts_with("INV-001,"));
}

#[test]
fn printable_export_of_search_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_json(dir.path());
    let mut browser =
        RecordBrowser::from_config(load_file(&path).unwrap().records, &config_for(dir.path()));

    browser.set_search("pending");
    assert_eq!(browser.stats().view_records, 3);

    let sink = DirectorySink::new(dir.path());
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();
    let notice = browser.export(ExportFormat::PrintableDocument, &sink, at);
    assert_eq!(notice.description(), "Data exported as PDF format.");

    let html = fs::read_to_string(dir.path().join("data-export-2024-04-01T08-30-00.html")).unwrap();
    assert!(html.contains("<p>Generated on: 2024-04-01 08:30:00 UTC</p>"));
    assert_eq!(html.matches("<td>PENDING</td>").count(), 3);
    assert!(!html.contains("<td>PAID</td>"));
}

#[test]
fn failed_write_reports_generic_notice() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file-not-dir");
    fs::write(&blocker, "x").unwrap();

    let records = recview::source::RecordSet::new(sample_records().unwrap()).unwrap();
    let mut browser = RecordBrowser::new(records, PageSize::default());
    browser.set_status(Selector::Only(Status::Open));
    let before = browser.view().clone();

    let sink = DirectorySink::new(&blocker);
    let notice = browser.export(ExportFormat::TabDelimited, &sink, Utc::now());

    assert_eq!(notice, ExportNotice::Failed);
    assert_eq!(notice.description(), "There was an error exporting the data.");
    assert_eq!(browser.view(), &before);
}

#[test]
fn jsonl_with_bad_line_still_browses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    let mut body = String::new();
    for record in sample_records().unwrap().iter().take(4) {
        body.push_str(&serde_json::to_string(record).unwrap());
        body.push('\n');
    }
    body.push_str("{\"id\": \"broken\"\n");
    fs::write(&path, body).unwrap();

    let report = load_file(&path).unwrap();
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.skipped.len(), 1);

    let browser = RecordBrowser::new(report.records, PageSize::default());
    assert_eq!(browser.stats().total_records, 4);
    assert_eq!(browser.view().meta().total_pages, 1);
}
