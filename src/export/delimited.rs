//! Delimited encoders: CSV and its tab-separated sibling.

use super::{full_row, Encode, ExportContext, ExportError, FULL_HEADERS};
use crate::model::Record;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Position of the counterparty name in [`FULL_HEADERS`].
const COUNTERPARTY_COLUMN: usize = 1;

/// Comma-separated text.
///
/// The counterparty name is always quoted. Any other field is quoted only
/// when it holds a comma, a quote or a line break. Inner quotes are doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedText;

/// Tab-separated text with no quoting. Values are assumed tab-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabDelimited;

impl Encode for DelimitedText {
    fn encode(&self, records: &[Record], _ctx: &ExportContext) -> Result<String, ExportError> {
        let mut out = String::new();
        push_csv_line(&mut out, FULL_HEADERS.iter().map(|title| (*title, false)));
        for record in records {
            let row = full_row(record);
            push_csv_line(
                &mut out,
                row.iter()
                    .enumerate()
                    .map(|(column, field)| (field.as_str(), column == COUNTERPARTY_COLUMN)),
            );
        }
        Ok(out)
    }
}

/// Append one comma-separated line. Each field comes with a force-quote flag.
///
/// `csv::WriterBuilder` picks one quote style for every field, so the
/// per-column rule is applied here.
fn push_csv_line<'a>(out: &mut String, fields: impl Iterator<Item = (&'a str, bool)>) {
    for (i, (field, force_quote)) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if force_quote || field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

impl Encode for TabDelimited {
    fn encode(&self, records: &[Record], _ctx: &ExportContext) -> Result<String, ExportError> {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'));
        write_rows(&builder, records)
    }
}

/// Header line, then one line per record.
fn write_rows(builder: &WriterBuilder, records: &[Record]) -> Result<String, ExportError> {
    let mut writer = builder.from_writer(Vec::new());
    writer.write_record(FULL_HEADERS)?;
    for record in records {
        writer.write_record(full_row(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
