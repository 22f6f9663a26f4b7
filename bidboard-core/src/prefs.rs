//! Filter-state persistence.
//!
//! One JSON file holds the toggle state and the group filter. Loaded once at
//! startup, rewritten on every change (atomic write via temp file + rename).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CalendarResult;
use crate::filter::{CategoryFilterState, GroupFilter};

/// The persisted filter selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPrefs {
    pub toggles: CategoryFilterState,
    pub group: GroupFilter,
}

/// Handle to the filter-prefs file.
pub struct FilterPrefsFile {
    path: PathBuf,
}

impl FilterPrefsFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FilterPrefsFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted prefs, defaulting when the file does not exist yet.
    pub fn load(&self) -> CalendarResult<FilterPrefs> {
        if !self.path.exists() {
            return Ok(FilterPrefs::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write prefs back. Called on every toggle/group change.
    pub fn save(&self, prefs: &FilterPrefs) -> CalendarResult<()> {
        let contents = serde_json::to_string_pretty(prefs)?;
        let temp_path = self.path.with_extension("tmp");

        std::fs::write(&temp_path, contents)?;
        // Rename is atomic on the same filesystem.
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
