//! File-save / print collaborator boundary.
//!
//! Encoders stop at the payload. A sink takes it from there; this is the
//! only place an export can genuinely fail.

use super::{ExportError, ExportPayload};
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives encoded payloads and hands them to storage or a print surface.
pub trait ExportSink {
    /// Store or present one payload.
    fn deliver(&self, payload: &ExportPayload) -> Result<(), ExportError>;
}

/// Writes each payload as a file named after `payload.filename` inside a
/// fixed directory, creating the directory when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `payload` will be written.
    ///
    /// Filenames must be a single plain path component.
    pub fn target_path(&self, payload: &ExportPayload) -> Result<PathBuf, ExportError> {
        let name = payload.filename.as_str();
        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !is_plain {
            return Err(ExportError::InvalidFilename(payload.filename.clone()));
        }
        Ok(self.dir.join(name))
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, payload: &ExportPayload) -> Result<(), ExportError> {
        let path = self.target_path(payload)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, payload.body.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            path = %path.display(),
            format = %payload.format,
            bytes = payload.body.len(),
            "Export written"
        );
        Ok(())
    }
}
