//! Local fallback persistence
//!
//! The journal is the degraded-mode store: the full booking list serialized
//! wholesale as a single JSON block. It carries no ordering or indexing of
//! its own; the in-memory mirror is rebuilt from it on open.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::BookingRecord;

/// File-backed booking list, read and written as one serialized block
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all journaled records; a missing file is an empty journal
    pub fn load(&self) -> Result<Vec<BookingRecord>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the journal contents with the given record list
    pub fn save(&self, records: &[BookingRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}
