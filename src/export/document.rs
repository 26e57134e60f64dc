//! Printable document encoder.
//!
//! Renders a self-contained HTML page (title, generation time, one table)
//! meant for a print dialog. The table has seven columns: created and
//! updated timestamps are left out.

use super::{Encode, ExportContext, ExportError};
use crate::model::Record;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// Column titles of the printable table, in output order.
pub const DOCUMENT_HEADERS: [&str; 7] = [
    "Invoice Number",
    "Vendor Name",
    "Invoice Date",
    "Due Date",
    "Amount",
    "Status",
    "Module",
];

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; font-size: 12px; }
th { background-color: #f2f2f2; font-weight: bold; }
h1 { color: #333; margin-bottom: 20px; }";

/// Printable HTML table of seven columns, without the audit timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintableDocument;

impl Encode for PrintableDocument {
    fn encode(&self, records: &[Record], ctx: &ExportContext) -> Result<String, ExportError> {
        let title = escape_html(&ctx.title);
        let mut out = String::new();

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{title}</title>")?;
        writeln!(out, "<style>\n{STYLE}\n</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<h1>{title}</h1>")?;
        writeln!(
            out,
            "<p>Generated on: {}</p>",
            ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out, "<table>")?;
        writeln!(out, "<thead>")?;
        write!(out, "<tr>")?;
        for header in DOCUMENT_HEADERS {
            write!(out, "<th>{header}</th>")?;
        }
        writeln!(out, "</tr>")?;
        writeln!(out, "</thead>")?;
        writeln!(out, "<tbody>")?;
        for record in records {
            write!(out, "<tr>")?;
            for cell in document_row(record, &ctx.currency_symbol) {
                write!(out, "<td>{}</td>", escape_html(&cell))?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

fn document_row(record: &Record, currency_symbol: &str) -> [String; 7] {
    [
        record.document_number().to_string(),
        record.counterparty().to_string(),
        record.effective_date().to_string(),
        record.due_date().to_string(),
        format_currency(record.amount(), currency_symbol),
        record.status().label().to_string(),
        record.module().label().to_string(),
    ]
}

/// Money for humans: symbol, thousands separators, two decimals.
///
/// Midpoints round away from zero. Negative amounts put the sign before the
/// symbol: `-$1,200.00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{symbol}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
