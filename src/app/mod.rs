//! Application layer coordinating state, mutations, and downloads.
//!
//! This layer sits between the outer shell (main.rs) and the client/domain
//! layers. Components share one state store and communicate exclusively
//! through it; no component hands results directly to another.
//!
//! # Modules
//!
//! - [`state`]: Central state store (snapshot, selection, popups, notification)
//! - [`orchestrator`]: Write operations with refetch-based refresh
//! - [`downloads`]: Staggered image download scheduling with cancellation

pub mod downloads;
pub mod orchestrator;
pub mod state;

pub use downloads::{DownloadScheduler, DownloadSink};
pub use orchestrator::MutationOrchestrator;
pub use state::{lock_state, shared, AppState, Notification, Popup, Severity, SharedState};
