//! Lifecycle owner of the aggregation view's persisted selection.
//!
//! The aggregation view remembers which parent item the user last expanded so
//! the selection survives a toggle away from the view and back. That key lives
//! in an explicit [`SelectionStore`] port rather than ambient global state:
//! opening the session restores it, selecting persists it, closing the session
//! clears it.

use crate::domain::error::Result;
use crate::storage::SelectionStore;

/// A live aggregation view session.
///
/// Holds the persisted selection for the duration of the view. Dropping the
/// session without calling [`close`](Self::close) leaves the key in place;
/// only an explicit teardown clears it.
pub struct AggregationSession<S: SelectionStore> {
    store: S,
    selected: Option<String>,
}

impl<S: SelectionStore> AggregationSession<S> {
    /// Opens the session, restoring the previously persisted selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: S) -> Result<Self> {
        let selected = store.load()?;
        tracing::debug!(restored = ?selected, "aggregation session opened");

        Ok(Self { store, selected })
    }

    /// Currently selected parent item id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects a parent item, persisting it for view-toggle continuity.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted write fails; the in-memory selection
    /// is not updated in that case.
    pub fn select(&mut self, id: &str) -> Result<()> {
        self.store.save(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Tears the session down, clearing the persisted key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn close(mut self) -> Result<()> {
        tracing::debug!("aggregation session closed");
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonSelectionStore;

    fn store_in(dir: &tempfile::TempDir) -> JsonSelectionStore {
        JsonSelectionStore::new(dir.path().join("selection.json")).unwrap()
    }

    #[test]
    fn selection_survives_a_view_toggle() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = AggregationSession::open(store_in(&dir)).unwrap();
        assert_eq!(session.selected(), None);
        session.select("car-42").unwrap();
        drop(session); // toggle away without teardown

        let session = AggregationSession::open(store_in(&dir)).unwrap();
        assert_eq!(session.selected(), Some("car-42"));
    }

    #[test]
    fn close_clears_the_persisted_key() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = AggregationSession::open(store_in(&dir)).unwrap();
        session.select("car-42").unwrap();
        session.close().unwrap();

        let session = AggregationSession::open(store_in(&dir)).unwrap();
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn reselection_overwrites_the_previous_key() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = AggregationSession::open(store_in(&dir)).unwrap();
        session.select("car-1").unwrap();
        session.select("car-2").unwrap();
        assert_eq!(session.selected(), Some("car-2"));
    }
}
