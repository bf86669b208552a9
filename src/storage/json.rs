//! JSON file-based selection store.
//!
//! Persists the single selected-item key in a small human-readable JSON file,
//! using atomic writes (write-to-temp + rename) so a crash never leaves the
//! file corrupt.

use crate::domain::error::{GaragebookError, Result};
use crate::storage::backend::SelectionStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk container format.
///
/// Versioned for future migrations, even though the payload is a single key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SelectionData {
    version: u32,

    /// Id of the last-viewed parent item, if any.
    #[serde(default)]
    selected_item_id: Option<String>,
}

impl Default for SelectionData {
    fn default() -> Self {
        Self {
            version: 1,
            selected_item_id: None,
        }
    }
}

/// JSON file selection store.
///
/// A missing file reads as "nothing selected"; the file is created lazily on
/// the first save.
pub struct JsonSelectionStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonSelectionStore {
    /// Creates a store backed by the given file path.
    ///
    /// Parent directories are created eagerly so later saves cannot fail on a
    /// missing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing selection store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    fn read_data(&self) -> Result<SelectionData> {
        if !self.file_path.exists() {
            return Ok(SelectionData::default());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        serde_json::from_str(&contents)
            .map_err(|e| GaragebookError::Storage(format!("failed to parse selection file: {e}")))
    }

    /// Writes the data atomically: temp file first, then rename over the
    /// target path.
    fn write_data(&self, data: &SelectionData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| GaragebookError::Storage(format!("failed to serialize selection: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        Ok(())
    }
}

impl SelectionStore for JsonSelectionStore {
    fn load(&self) -> Result<Option<String>> {
        let data = self.read_data()?;
        tracing::debug!(selected = ?data.selected_item_id, "selection loaded");
        Ok(data.selected_item_id)
    }

    fn save(&mut self, id: &str) -> Result<()> {
        let mut data = self.read_data()?;
        data.selected_item_id = Some(id.to_string());
        self.write_data(&data)?;

        tracing::debug!(selected = %id, "selection saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let mut data = self.read_data()?;
        data.selected_item_id = None;
        self.write_data(&data)?;

        tracing::debug!("selection cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonSelectionStore {
        JsonSelectionStore::new(dir.path().join("selection.json")).unwrap()
    }

    #[test]
    fn missing_file_reads_as_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save("car-42").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("car-42"));

        store.save("car-43").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("car-43"));
    }

    #[test]
    fn clear_removes_the_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save("car-42").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clearing_an_empty_store_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn no_temp_file_left_behind_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save("car-42").unwrap();
        assert!(!dir.path().join("selection.tmp").exists());
    }
}
