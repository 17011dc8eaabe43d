//! Persisted audit reports.
//!
//! A completed audit's report lives at
//! `{root}/audit_reports/AuditReport-{audit_id}.pdf`. Writes go through a
//! temp file in the same directory and an atomic rename, so readers see
//! either the previous report or the new one.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Directory under the storage root holding report files.
pub const REPORT_DIR: &str = "audit_reports";

#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn file_name(audit_id: &str) -> String {
        format!("AuditReport-{audit_id}.pdf")
    }

    /// Path relative to the storage root, as recorded in the activity log.
    #[must_use]
    pub fn relative_path(audit_id: &str) -> String {
        format!("{REPORT_DIR}/{}", Self::file_name(audit_id))
    }

    #[must_use]
    pub fn path_for(&self, audit_id: &str) -> PathBuf {
        self.root.join(REPORT_DIR).join(Self::file_name(audit_id))
    }

    #[must_use]
    pub fn exists(&self, audit_id: &str) -> bool {
        self.path_for(audit_id).is_file()
    }

    /// Write (or overwrite) the report for `audit_id`. Returns the final path.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created or the file
    /// cannot be written or renamed into place.
    pub fn write(&self, audit_id: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(audit_id);
        let dir = self.root.join(REPORT_DIR);
        fs::create_dir_all(&dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "report written");
        Ok(path)
    }

    /// # Errors
    ///
    /// Returns the I/O error if the file is missing or unreadable.
    pub fn read(&self, audit_id: &str) -> std::io::Result<Vec<u8>> {
        fs::read(self.path_for(audit_id))
    }
}
