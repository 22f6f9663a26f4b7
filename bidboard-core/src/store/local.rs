//! The local fallback store.
//!
//! One JSON file holding the full event array. Every call re-reads the whole
//! collection and every mutation rewrites it (atomic temp file + rename);
//! within a process, writes are serialized by the caller's await ordering.

use std::path::{Path, PathBuf};

use crate::error::CalendarResult;
use crate::event::CalendarEvent;

pub struct LocalEventStore {
    path: PathBuf,
}

impl LocalEventStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        LocalEventStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full event collection. A missing file is an empty store.
    pub fn load(&self) -> CalendarResult<Vec<CalendarEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Rewrite the full event collection.
    pub fn save(&self, events: &[CalendarEvent]) -> CalendarResult<()> {
        let contents = serde_json::to_string_pretty(events)?;
        let temp_path = self.path.with_extension("tmp");

        std::fs::write(&temp_path, contents)?;
        // Rename is atomic on the same filesystem.
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
