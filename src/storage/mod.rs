//! Storage layer for the persisted view-selection key.
//!
//! This module provides the out-of-process storage port behind the aggregation
//! view's selected-item continuity (the id survives a view toggle and is
//! cleared on teardown). It is the only thing the crate persists locally; the
//! inventory data itself is owned by the remote API.
//!
//! # Modules
//!
//! - `backend`: [`SelectionStore`] trait abstraction
//! - `json`: JSON file-based implementation with atomic writes

pub mod backend;
pub mod json;

pub use backend::SelectionStore;
pub use json::JsonSelectionStore;

use std::path::PathBuf;

/// Returns the default path of the selection file.
///
/// Follows `$XDG_DATA_HOME/garagebook/selection.json`, falling back to
/// `~/.local/share/garagebook/selection.json`, and to a path relative to the
/// working directory when no home directory is known.
#[must_use]
pub fn default_selection_path() -> PathBuf {
    let data_dir = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from(".local/share"));

    data_dir.join("garagebook").join("selection.json")
}
