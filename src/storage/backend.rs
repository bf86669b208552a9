//! Selection storage abstraction.
//!
//! This module defines the [`SelectionStore`] trait that abstracts over the
//! out-of-process storage holding the last-viewed parent item id. The key
//! survives a view toggle within one run; the aggregation view clears it on
//! teardown.
//!
//! # Design Philosophy
//!
//! The trait is deliberately a single-key port, not a generic key-value store.
//! Routing the key through an explicit port with an init/teardown contract,
//! rather than ambient global state, is what makes the lifecycle testable.

use crate::domain::error::Result;

/// Abstraction over the persisted selected-item key.
///
/// # Implementations
///
/// - [`JsonSelectionStore`](crate::storage::JsonSelectionStore): JSON file with
///   atomic writes (default)
pub trait SelectionStore: Send {
    /// Reads the persisted item id, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<String>>;

    /// Persists the given item id, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, id: &str) -> Result<()>;

    /// Removes the persisted id.
    ///
    /// Called on view teardown. Clearing an already-empty store is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&mut self) -> Result<()>;
}
