//! Mutation Orchestrator: write operations with refetch-based refresh.
//!
//! Every successful mutation is followed by a full list refetch that replaces
//! the store snapshot; local state is never patched optimistically, so the
//! store always reflects what the server confirmed. Failures never propagate
//! past this boundary: the snapshot is left untouched and exactly one error
//! notification is emitted.
//!
//! A per-identity in-flight registry rejects a second concurrent mutation
//! against the same item id while the first is still running. Creates carry
//! no identity yet and are not guarded.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::app::state::{lock_state, Popup, Severity, SharedState};
use crate::client::InventoryApi;
use crate::domain::error::{GaragebookError, Result};
use crate::domain::Item;

type InFlightRegistry = Arc<Mutex<HashSet<String>>>;

/// Removes its key from the registry when the mutation finishes, on every
/// exit path including panics.
struct InFlightGuard {
    registry: InFlightRegistry,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Drives create/update/delete against the remote inventory and keeps the
/// state store in sync through refetch.
pub struct MutationOrchestrator<C: InventoryApi> {
    client: Arc<C>,
    state: SharedState,
    in_flight: InFlightRegistry,
}

impl<C: InventoryApi> MutationOrchestrator<C> {
    #[must_use]
    pub fn new(client: Arc<C>, state: SharedState) -> Self {
        Self {
            client,
            state,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Fetches the full item list and replaces the store snapshot.
    ///
    /// Used at startup and after every successful mutation.
    pub async fn refresh(&self) {
        tracing::debug!("refreshing item list");

        match self.client.list().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "item list refreshed");
                lock_state(&self.state).replace_all(items);
            }
            Err(e) => {
                tracing::debug!(error = %e, "item list refresh failed");
                lock_state(&self.state)
                    .notify(Severity::Error, format!("Error fetching items: {e}"));
            }
        }
    }

    /// Creates `item` remotely, then refetches.
    ///
    /// On success the add popup is closed and a success notification shown.
    pub async fn create(&self, item: &Item) {
        tracing::debug!(label = %item.label(), "create requested");

        match self.client.create(item).await {
            Ok(created) => {
                tracing::debug!(id = ?created.id, "item created");
                self.settle_success(Popup::Add, "Item added successfully")
                    .await;
            }
            Err(e) => self.settle_failure("adding item", &e),
        }
    }

    /// Updates the item identified by its own id, then refetches.
    ///
    /// Rejected locally when the item has no id or when another mutation for
    /// the same id is still in flight. On success the edit popup is closed.
    pub async fn update(&self, item: &Item) {
        let Some(id) = item.id.clone() else {
            lock_state(&self.state).notify(
                Severity::Error,
                "Error updating item: item has no id".to_string(),
            );
            return;
        };
        tracing::debug!(id = %id, "update requested");

        let Some(_guard) = self.try_register(&id) else {
            self.settle_failure("updating item", &conflict(&id));
            return;
        };

        match self.client.update(&id, item).await {
            Ok(_) => {
                self.settle_success(Popup::Edit, "Item updated successfully")
                    .await;
            }
            Err(e) => self.settle_failure("updating item", &e),
        }
    }

    /// Deletes the item with `id`, then refetches.
    ///
    /// Gated on the store's admin flag: a non-admin caller gets an
    /// authorization notification and no request is issued.
    pub async fn delete(&self, id: &str) {
        if !lock_state(&self.state).is_admin {
            tracing::debug!(id = %id, "delete rejected, not admin");
            lock_state(&self.state).notify(
                Severity::Error,
                "You are not authorized to delete items".to_string(),
            );
            return;
        }
        tracing::debug!(id = %id, "delete requested");

        let Some(_guard) = self.try_register(id) else {
            self.settle_failure("deleting item", &conflict(id));
            return;
        };

        match self.client.delete(id).await {
            Ok(()) => {
                self.settle_success(Popup::View, "Item deleted successfully")
                    .await;
            }
            Err(e) => self.settle_failure("deleting item", &e),
        }
    }

    /// Registers `id` as in flight, or returns `None` when it already is.
    fn try_register(&self, id: &str) -> Option<InFlightGuard> {
        let mut registry = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if registry.insert(id.to_string()) {
            Some(InFlightGuard {
                registry: Arc::clone(&self.in_flight),
                key: id.to_string(),
            })
        } else {
            None
        }
    }

    /// Post-mutation success path: refetch, close the originating popup,
    /// report. A failed refetch downgrades the outcome to an error
    /// notification since the snapshot could not be confirmed.
    async fn settle_success(&self, popup: Popup, message: &str) {
        match self.client.list().await {
            Ok(items) => {
                let mut state = lock_state(&self.state);
                state.replace_all(items);
                state.close_popup(popup);
                state.notify(Severity::Success, message.to_string());
            }
            Err(e) => {
                tracing::debug!(error = %e, "post-mutation refetch failed");
                lock_state(&self.state)
                    .notify(Severity::Error, format!("Error fetching items: {e}"));
            }
        }
    }

    fn settle_failure(&self, action: &str, error: &GaragebookError) {
        tracing::debug!(error = %error, "mutation failed");
        lock_state(&self.state).notify(Severity::Error, format!("Error {action}: {error}"));
    }
}

fn conflict(id: &str) -> GaragebookError {
    GaragebookError::Conflict(format!("a mutation for item {id} is already in flight"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{shared, AppState};
    use crate::domain::{Car, CarDraft, CarSearchHit, FileEntry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn tire(id: &str, brand: &str) -> Item {
        let mut item = Item::new_tire(brand, "205/55R16");
        item.id = Some(id.to_string());
        item
    }

    /// Fake API over an in-memory item list, with call counters and an
    /// optional gate that holds update calls open until released.
    struct FakeApi {
        items: Mutex<Vec<Item>>,
        fail_mutations: bool,
        fail_list: bool,
        update_gate: Option<Arc<Notify>>,
        list_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        update_calls: AtomicUsize,
    }

    impl FakeApi {
        fn seeded(items: Vec<Item>) -> Self {
            Self {
                items: Mutex::new(items),
                fail_mutations: false,
                fail_list: false,
                update_gate: None,
                list_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
            }
        }

        fn server_error() -> GaragebookError {
            GaragebookError::Server {
                status: 500,
                message: "boom".to_string(),
            }
        }
    }

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn list(&self) -> Result<Vec<Item>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list {
                return Err(Self::server_error());
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn create(&self, item: &Item) -> Result<Item> {
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            let mut created = item.clone();
            created.id = Some("created".to_string());
            self.items.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &str, item: &Item) -> Result<Item> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.update_gate {
                gate.notified().await;
            }
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            let mut items = self.items.lock().unwrap();
            if let Some(slot) = items.iter_mut().find(|i| i.id.as_deref() == Some(id)) {
                *slot = item.clone();
            }
            Ok(item.clone())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            self.items
                .lock()
                .unwrap()
                .retain(|i| i.id.as_deref() != Some(id));
            Ok(())
        }

        async fn search_items(&self, _term: &str) -> Result<Vec<Item>> {
            unimplemented!("not used by orchestrator tests")
        }
        async fn search_cars(&self, _term: &str) -> Result<Vec<CarSearchHit>> {
            unimplemented!("not used by orchestrator tests")
        }
        async fn search_files(&self, _term: &str) -> Result<Vec<FileEntry>> {
            unimplemented!("not used by orchestrator tests")
        }
        async fn create_car(&self, _draft: &CarDraft) -> Result<Car> {
            unimplemented!("not used by orchestrator tests")
        }
    }

    fn orchestrator(api: FakeApi) -> (MutationOrchestrator<FakeApi>, Arc<FakeApi>, SharedState) {
        let api = Arc::new(api);
        let state = shared(AppState::new());
        let orchestrator = MutationOrchestrator::new(Arc::clone(&api), Arc::clone(&state));
        (orchestrator, api, state)
    }

    #[tokio::test]
    async fn create_refetches_and_closes_add_popup() {
        let (orchestrator, api, state) = orchestrator(FakeApi::seeded(vec![]));
        lock_state(&state).open_popup(Popup::Add);

        orchestrator.create(&Item::new_tire("Michelin", "205/55R16")).await;

        let state = lock_state(&state);
        assert_eq!(state.items.len(), 1);
        assert!(!state.popups.add);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Success);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_snapshot_untouched() {
        let mut api = FakeApi::seeded(vec![tire("1", "A")]);
        api.fail_mutations = true;
        let (orchestrator, api, state) = orchestrator(api);
        lock_state(&state).replace_all(vec![tire("1", "A")]);

        orchestrator.create(&Item::new_tire("B", "2")).await;

        let state = lock_state(&state);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Error);
        // No refetch on failure.
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_without_id_is_rejected_locally() {
        let (orchestrator, api, state) = orchestrator(FakeApi::seeded(vec![]));

        orchestrator.update(&Item::new_tire("Michelin", "205/55R16")).await;

        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
        let state = lock_state(&state);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn update_success_closes_edit_popup() {
        let (orchestrator, _api, state) = orchestrator(FakeApi::seeded(vec![tire("1", "A")]));
        lock_state(&state).open_popup(Popup::Edit);

        orchestrator.update(&tire("1", "A2")).await;

        let state = lock_state(&state);
        assert!(!state.popups.edit);
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn concurrent_update_of_same_id_is_rejected() {
        let gate = Arc::new(Notify::new());
        let mut api = FakeApi::seeded(vec![tire("1", "A")]);
        api.update_gate = Some(Arc::clone(&gate));
        let (orchestrator, api, state) = orchestrator(api);
        let orchestrator = Arc::new(orchestrator);

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.update(&tire("1", "A2")).await })
        };
        // Wait until the first update is parked inside the client call.
        while api.update_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        orchestrator.update(&tire("1", "A3")).await;
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            lock_state(&state).notification.as_ref().unwrap().severity,
            Severity::Error
        );

        gate.notify_one();
        first.await.unwrap();

        // The guard is released once the first mutation settles.
        orchestrator.update(&tire("1", "A4")).await;
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn delete_as_non_admin_issues_no_request() {
        let (orchestrator, api, state) =
            orchestrator(FakeApi::seeded(vec![tire("1", "A"), tire("2", "B")]));
        lock_state(&state).replace_all(vec![tire("1", "A"), tire("2", "B")]);

        orchestrator.delete("1").await;

        assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        let state = lock_state(&state);
        assert_eq!(state.items.len(), 2);
        assert_eq!(
            state.notification.as_ref().unwrap().message,
            "You are not authorized to delete items"
        );
    }

    #[tokio::test]
    async fn delete_as_admin_removes_item_via_refetch() {
        let (orchestrator, _api, state) =
            orchestrator(FakeApi::seeded(vec![tire("1", "A"), tire("2", "B")]));
        {
            let mut state = lock_state(&state);
            state.is_admin = true;
            state.replace_all(vec![tire("1", "A"), tire("2", "B")]);
        }

        orchestrator.delete("1").await;

        let state = lock_state(&state);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id.as_deref(), Some("2"));
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn failed_refetch_after_mutation_reports_an_error() {
        let mut api = FakeApi::seeded(vec![]);
        api.fail_list = true;
        let (orchestrator, _api, state) = orchestrator(api);

        orchestrator.create(&Item::new_tire("Michelin", "205/55R16")).await;

        let state = lock_state(&state);
        assert!(state.items.is_empty());
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn refresh_replaces_the_snapshot() {
        let (orchestrator, _api, state) = orchestrator(FakeApi::seeded(vec![tire("1", "A")]));

        orchestrator.refresh().await;

        assert_eq!(lock_state(&state).items.len(), 1);
    }
}
