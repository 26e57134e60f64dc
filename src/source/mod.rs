//! Record source boundary.
//!
//! The engine treats the record collection as read-only input owned by the
//! caller. This module turns external data into that input:
//! - JSON array documents (`.json`)
//! - JSON Lines, one record per line (`.jsonl`), where malformed lines are
//!   skipped and reported instead of aborting the load
//!
//! Every load ends in a [`RecordSet`], which enforces identifier uniqueness
//! across the collection. Per-record invariants are enforced by
//! [`Record`]'s own deserialization.

use crate::model::{Record, RecordId};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors encountered while loading a record collection.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The specified file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file extension names no supported format.
    #[error("Unsupported record file format: {path}")]
    UnsupportedFormat {
        /// The path with the unsupported extension.
        path: PathBuf,
    },

    /// A JSON document (or JSON line) failed to parse or violated a record
    /// invariant.
    #[error("Invalid record data at line {line}: {message}")]
    InvalidRecord {
        /// The line number of the offending record.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Two records share an identifier.
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),

    /// Reading the source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ===== RecordSet =====

/// An immutable record collection with unique identifiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Smart constructor: rejects duplicate identifiers.
    pub fn new(records: Vec<Record>) -> Result<Self, SourceError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(SourceError::DuplicateId(record.id().clone()));
            }
        }
        Ok(Self { records })
    }

    /// The records, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the records out of the set.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Result of a tolerant load: the usable records plus what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records that loaded.
    pub records: RecordSet,
    /// One error per skipped line.
    pub skipped: Vec<SourceError>,
}

// ===== Loading =====

/// Parse a JSON array of records. Any invalid element fails the whole load.
pub fn load_json<R: BufRead>(reader: R) -> Result<RecordSet, SourceError> {
    let records: Vec<Record> =
        serde_json::from_reader(reader).map_err(|e| SourceError::InvalidRecord {
            line: e.line(),
            message: e.to_string(),
        })?;
    RecordSet::new(records)
}

/// Parse JSON Lines. Blank lines are ignored; malformed lines are skipped.
///
/// Duplicate identifiers still fail the load: dropping one of two records
/// with the same id would silently pick a winner.
pub fn load_jsonl<R: BufRead>(reader: R) -> Result<LoadReport, SourceError> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(line = line_number, error = %e, "Skipping malformed record line");
                skipped.push(SourceError::InvalidRecord {
                    line: line_number,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(LoadReport {
        records: RecordSet::new(records)?,
        skipped,
    })
}

/// Load a record file, choosing the format from its extension.
pub fn load_file(path: &Path) -> Result<LoadReport, SourceError> {
    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    let report = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => LoadReport {
            records: load_json(reader)?,
            skipped: Vec::new(),
        },
        Some("jsonl") => load_jsonl(reader)?,
        _ => {
            return Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    info!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped.len(),
        "Loaded record file"
    );
    Ok(report)
}
