//! Inventory state store.
//!
//! This module defines [`AppState`], the process-local state the presentation
//! shell renders from: the current item snapshot, the selected item, popup
//! visibility flags, search results, and the transient notification. It is the
//! single source of truth for all transient UI state.
//!
//! # Writer discipline
//!
//! The store is single-writer by convention: only the mutation orchestrator and
//! the search coordinator mutate it (plus popup toggles from the shell), while
//! anything may read. The item snapshot is always a complete copy from the most
//! recent successful fetch — there is no partial merge of old and new state,
//! and nothing ever splices an item out locally.

use std::sync::{Arc, Mutex};

use crate::domain::Item;
use crate::search::SearchHit;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A transient user-visible notification.
///
/// There is no queue: the newest notification always replaces the previous
/// one, even if it was still visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Which popup a visibility operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Add,
    Edit,
    View,
    Search,
    Results,
}

/// Visibility flags, one per popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupFlags {
    pub add: bool,
    pub edit: bool,
    pub view: bool,
    pub search: bool,
    pub results: bool,
}

/// Central application state container.
#[derive(Debug, Default)]
pub struct AppState {
    /// Complete item snapshot from the most recent successful fetch.
    pub items: Vec<Item>,

    /// Item the currently open popup concerns, if any.
    ///
    /// Ephemeral: overwritten on every popup open and cleared on close. This
    /// is the only channel through which a popup learns its subject.
    pub selected: Option<Item>,

    /// Result set of the most recent successful search.
    pub search_results: Vec<SearchHit>,

    /// Popup visibility flags.
    pub popups: PopupFlags,

    /// Current notification, replaced wholesale by [`notify`](Self::notify).
    pub notification: Option<Notification>,

    /// Whether the user holds the admin flag (gates delete).
    pub is_admin: bool,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the item snapshot with a fresh complete fetch.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        tracing::debug!(count = items.len(), "item snapshot replaced");
        self.items = items;
    }

    /// Selects the item an about-to-open popup concerns.
    pub fn select(&mut self, item: Item) {
        self.selected = Some(item);
    }

    /// Clears the selection (popup close).
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Shows a notification, discarding any currently shown one.
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        if self.notification.is_some() {
            tracing::debug!("replacing visible notification");
        }
        self.notification = Some(Notification { severity, message });
    }

    /// Dismisses the current notification, if any.
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Opens a popup, setting its visibility flag.
    pub fn open_popup(&mut self, popup: Popup) {
        *self.popup_flag(popup) = true;
    }

    /// Closes a popup and clears the selection it was reading.
    pub fn close_popup(&mut self, popup: Popup) {
        *self.popup_flag(popup) = false;
        self.clear_selection();
    }

    fn popup_flag(&mut self, popup: Popup) -> &mut bool {
        match popup {
            Popup::Add => &mut self.popups.add,
            Popup::Edit => &mut self.popups.edit,
            Popup::View => &mut self.popups.view,
            Popup::Search => &mut self.popups.search,
            Popup::Results => &mut self.popups.results,
        }
    }
}

/// Shared handle to the store.
///
/// Locked briefly for each read or mutation; never held across an await.
pub type SharedState = Arc<Mutex<AppState>>;

/// Wraps a state value into the shared handle components hold.
#[must_use]
pub fn shared(state: AppState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Locks the shared state, recovering from a poisoned lock.
///
/// A panic mid-mutation leaves the store in whatever shape the panicking
/// section got it to; the next full snapshot replacement heals it, so
/// poisoning is recovered from rather than propagated.
pub fn lock_state(state: &SharedState) -> std::sync::MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
