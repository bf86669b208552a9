//! Search Coordinator: fan-out across searchable kinds, fan-in to one list.
//!
//! One search request is issued per enabled kind, in parallel; successful
//! result arrays are concatenated in the order the kinds were enabled. A
//! failure in any one kind aborts the entire search and surfaces that failure —
//! no partial results leak through. That all-or-nothing rule is a deliberate
//! simplicity/consistency trade-off over partial degradation.
//!
//! Kinds left out of `enabled_kinds` are simply excluded from the fan-out.
//! File search is live at the client level but not enabled by default callers;
//! re-enabling it is a matter of passing the kind, not restructuring.

use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::app::state::{lock_state, Popup, Severity, SharedState};
use crate::client::InventoryApi;
use crate::domain::error::Result;
use crate::domain::{CarSearchHit, FileEntry, Item};

/// A searchable entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Top-level items via the aggregated endpoint; hits embed the flat
    /// category/file arrays the aggregator consumes.
    Items,
    /// Files, searched independently of their parent items.
    Files,
}

/// One element of a heterogeneous search result list.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    /// A plain top-level item (direct catalog search).
    Item(Item),
    /// An aggregated car hit with nested data.
    Car(CarSearchHit),
    /// A file hit.
    File(FileEntry),
}

/// Coordinates searches and writes their outcome into the state store.
///
/// Failures never propagate past this boundary: a failed search leaves the
/// store's result set untouched and emits exactly one error notification.
pub struct SearchCoordinator<C: InventoryApi> {
    client: Arc<C>,
    state: SharedState,
}

impl<C: InventoryApi> SearchCoordinator<C> {
    #[must_use]
    pub fn new(client: Arc<C>, state: SharedState) -> Self {
        Self { client, state }
    }

    /// Runs a fan-out search over the enabled kinds.
    ///
    /// On success the store's result set is replaced, the results popup is
    /// raised, and an info notification reports the hit count. On failure the
    /// result set is left unchanged and one error notification is shown.
    ///
    /// An empty term is legal; the endpoints decide whether it matches all or
    /// none, and the coordinator does not special-case it.
    pub async fn search(&self, term: &str, enabled_kinds: &[SearchKind]) {
        tracing::debug!(term = %term, kinds = ?enabled_kinds, "search requested");

        match self.fan_out(term, enabled_kinds).await {
            Ok(hits) => {
                let count = hits.len();
                let mut state = lock_state(&self.state);
                state.search_results = hits;
                state.open_popup(Popup::Results);
                state.notify(Severity::Info, format!("Found {count} result(s)"));
            }
            Err(e) => {
                tracing::debug!(error = %e, "search failed");
                let mut state = lock_state(&self.state);
                state.notify(Severity::Error, format!("Error searching: {e}"));
            }
        }
    }

    /// Runs a direct catalog search against the plain item endpoint.
    ///
    /// This is the single-kind path the tire variant uses; it shares the
    /// coordinator's store/notification behavior but skips the fan-out.
    pub async fn search_catalog(&self, term: &str) {
        tracing::debug!(term = %term, "catalog search requested");

        match self.client.search_items(term).await {
            Ok(items) => {
                let count = items.len();
                let mut state = lock_state(&self.state);
                state.search_results = items.into_iter().map(SearchHit::Item).collect();
                state.open_popup(Popup::Results);
                state.notify(Severity::Info, format!("Found {count} item(s)"));
            }
            Err(e) => {
                tracing::debug!(error = %e, "catalog search failed");
                let mut state = lock_state(&self.state);
                state.notify(Severity::Error, format!("Error searching items: {e}"));
            }
        }
    }

    /// Issues the per-kind requests in parallel and concatenates the batches
    /// in kind-enable order. The first failure cancels the rest.
    async fn fan_out(&self, term: &str, kinds: &[SearchKind]) -> Result<Vec<SearchHit>> {
        let batches = try_join_all(kinds.iter().map(|kind| self.search_kind(term, *kind))).await?;

        Ok(batches.into_iter().flatten().collect())
    }

    async fn search_kind(&self, term: &str, kind: SearchKind) -> Result<Vec<SearchHit>> {
        match kind {
            SearchKind::Items => Ok(self
                .client
                .search_cars(term)
                .await?
                .into_iter()
                .map(SearchHit::Car)
                .collect()),
            SearchKind::Files => Ok(self
                .client
                .search_files(term)
                .await?
                .into_iter()
                .map(SearchHit::File)
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{shared, AppState};
    use crate::domain::error::GaragebookError;
    use crate::domain::{Car, CarDraft};
    use async_trait::async_trait;

    /// Fake API with configurable search outcomes.
    struct FakeApi {
        cars: Vec<CarSearchHit>,
        files: std::result::Result<Vec<FileEntry>, ()>,
    }

    impl FakeApi {
        fn with_cars(cars: Vec<CarSearchHit>) -> Self {
            Self { cars, files: Ok(vec![]) }
        }
    }

    fn car_hit(name: &str) -> CarSearchHit {
        CarSearchHit {
            car: Some(Car {
                id: Some(name.to_lowercase()),
                name: name.to_string(),
                model: "Mustang".to_string(),
                image: None,
                owner: None,
            }),
            categories: vec![],
            files: vec![],
        }
    }

    fn file_hit(id: &str) -> FileEntry {
        FileEntry {
            id: id.to_string(),
            name: id.to_string(),
            notes: None,
            category: "c1".to_string(),
            picture_links: vec![],
        }
    }

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn list(&self) -> Result<Vec<Item>> {
            Ok(vec![])
        }
        async fn create(&self, _item: &Item) -> Result<Item> {
            unimplemented!("not used by search tests")
        }
        async fn update(&self, _id: &str, _item: &Item) -> Result<Item> {
            unimplemented!("not used by search tests")
        }
        async fn delete(&self, _id: &str) -> Result<()> {
            unimplemented!("not used by search tests")
        }
        async fn search_items(&self, _term: &str) -> Result<Vec<Item>> {
            Ok(vec![Item::new_tire("Michelin", "205/55R16")])
        }
        async fn search_cars(&self, _term: &str) -> Result<Vec<CarSearchHit>> {
            Ok(self.cars.clone())
        }
        async fn search_files(&self, _term: &str) -> Result<Vec<FileEntry>> {
            self.files
                .clone()
                .map_err(|()| GaragebookError::Network("file search unreachable".to_string()))
        }
        async fn create_car(&self, _draft: &CarDraft) -> Result<Car> {
            unimplemented!("not used by search tests")
        }
    }

    fn coordinator(api: FakeApi) -> (SearchCoordinator<FakeApi>, SharedState) {
        let state = shared(AppState::new());
        let coordinator = SearchCoordinator::new(Arc::new(api), Arc::clone(&state));
        (coordinator, state)
    }

    #[tokio::test]
    async fn results_concatenate_in_kind_enable_order() {
        let api = FakeApi {
            cars: vec![car_hit("Eleanor")],
            files: Ok(vec![file_hit("f1")]),
        };
        let (coordinator, state) = coordinator(api);

        coordinator
            .search("mustang", &[SearchKind::Items, SearchKind::Files])
            .await;

        let state = state.lock().unwrap();
        assert_eq!(state.search_results.len(), 2);
        assert!(matches!(state.search_results[0], SearchHit::Car(_)));
        assert!(matches!(state.search_results[1], SearchHit::File(_)));
        assert!(state.popups.results);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Info);
    }

    #[tokio::test]
    async fn one_failing_kind_fails_the_whole_search() {
        let api = FakeApi {
            cars: vec![car_hit("Eleanor")],
            files: Err(()),
        };
        let (coordinator, state) = coordinator(api);

        // Pre-existing results must survive the failed search untouched.
        state
            .lock()
            .unwrap()
            .search_results
            .push(SearchHit::File(file_hit("old")));

        coordinator
            .search("mustang", &[SearchKind::Items, SearchKind::Files])
            .await;

        let state = state.lock().unwrap();
        assert_eq!(state.search_results.len(), 1);
        assert!(matches!(state.search_results[0], SearchHit::File(ref f) if f.id == "old"));
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn disabled_kinds_are_excluded_from_fan_out() {
        // Files would fail if queried; with only Items enabled it never is.
        let api = FakeApi {
            cars: vec![car_hit("Eleanor")],
            files: Err(()),
        };
        let (coordinator, state) = coordinator(api);

        coordinator.search("mustang", &[SearchKind::Items]).await;

        let state = state.lock().unwrap();
        assert_eq!(state.search_results.len(), 1);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Info);
    }

    #[tokio::test]
    async fn repeated_identical_searches_are_idempotent() {
        let api = FakeApi::with_cars(vec![car_hit("Eleanor"), car_hit("Brutus")]);
        let (coordinator, state) = coordinator(api);

        coordinator.search("e", &[SearchKind::Items]).await;
        let first = state.lock().unwrap().search_results.clone();

        coordinator.search("e", &[SearchKind::Items]).await;
        let second = state.lock().unwrap().search_results.clone();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_term_is_a_legal_search() {
        let api = FakeApi::with_cars(vec![]);
        let (coordinator, state) = coordinator(api);

        coordinator.search("", &[SearchKind::Items]).await;

        let state = state.lock().unwrap();
        assert!(state.search_results.is_empty());
        assert_eq!(
            state.notification.as_ref().unwrap().message,
            "Found 0 result(s)"
        );
    }

    #[tokio::test]
    async fn catalog_search_wraps_plain_items() {
        let api = FakeApi::with_cars(vec![]);
        let (coordinator, state) = coordinator(api);

        coordinator.search_catalog("michelin").await;

        let state = state.lock().unwrap();
        assert_eq!(state.search_results.len(), 1);
        assert!(matches!(state.search_results[0], SearchHit::Item(_)));
        assert_eq!(
            state.notification.as_ref().unwrap().message,
            "Found 1 item(s)"
        );
    }
}
