//! Garagebook: a client-side inventory manager for physical assets.
//!
//! Garagebook keeps a local, typed view of a remote inventory service and
//! provides:
//! - A typed HTTP client over the service's REST endpoints
//! - Aggregation of flat category/file arrays into per-item trees
//! - Fan-out search across enabled entity kinds with all-or-nothing results
//! - Mutation orchestration with refetch-based refresh and conflict guarding
//! - A central state store feeding whatever shell sits on top
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Shell (main.rs, CLI feature)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State store
//! │  - Mutation orchestration                           │  ← Business logic
//! │  - Download scheduling                              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search Layer  │   │ Client Layer  │   │ Storage Layer │
//! │ (search/)     │   │ (client/)     │   │ (storage/)    │
//! │ - Fan-out     │   │ - REST calls  │   │ - Selection   │
//! │ - Fan-in      │   │ - Decoding    │   │   persistence │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Aggregation & Domain Layers                        │
//! │  - Item/Category/File trees (aggregate/)            │
//! │  - Error types (domain/error)                       │
//! │  - Inventory model (domain/item, domain/car)        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State store, mutation orchestrator, download scheduler
//! - [`aggregate`]: Relational aggregation and selection sessions
//! - [`client`]: Typed HTTP client over the inventory REST API
//! - [`domain`]: Core domain types (items, cars, errors)
//! - [`search`]: Fan-out/fan-in search coordination
//! - [`storage`]: JSON file persistence for the item selection
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use garagebook::app::{shared, AppState, MutationOrchestrator};
//! use garagebook::client::HttpInventoryClient;
//! use garagebook::Config;
//!
//! # async fn run() -> garagebook::Result<()> {
//! let config = Config::from_env();
//! let client = Arc::new(HttpInventoryClient::new(
//!     &config.base_url,
//!     Duration::from_secs(config.request_timeout_secs),
//! )?);
//! let state = shared(AppState::new());
//!
//! let orchestrator = MutationOrchestrator::new(client, Arc::clone(&state));
//! orchestrator.refresh().await;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod app;
pub mod client;
pub mod domain;
pub mod search;
pub mod storage;

pub use app::{AppState, MutationOrchestrator, SharedState};
pub use client::{HttpInventoryClient, InventoryApi};
pub use domain::{GaragebookError, Item, Result};
pub use search::{SearchCoordinator, SearchHit, SearchKind};

use serde::Deserialize;
use std::path::Path;

/// Runtime configuration, read from a TOML file or the environment.
///
/// # Example
///
/// ```toml
/// # garagebook.toml
/// base_url = "http://localhost:4000/api"
/// request_timeout_secs = 10
/// download_stagger_ms = 500
/// default_owner = "put_user_id_here"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the inventory service API, including the path prefix.
    ///
    /// Default: `http://localhost:4000/api`
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Delay between consecutive scheduled image downloads, in milliseconds.
    ///
    /// Default: 500
    pub download_stagger_ms: u64,

    /// Owner id stamped onto newly created cars when none is given.
    pub default_owner: Option<String>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            request_timeout_secs: 10,
            download_stagger_ms: 500,
            default_owner: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from `GARAGEBOOK_*` environment variables,
    /// falling back to defaults for anything unset.
    ///
    /// Recognized variables: `GARAGEBOOK_BASE_URL`,
    /// `GARAGEBOOK_REQUEST_TIMEOUT_SECS`, `GARAGEBOOK_DOWNLOAD_STAGGER_MS`,
    /// `GARAGEBOOK_DEFAULT_OWNER`, `GARAGEBOOK_TRACE_LEVEL`. Unparsable
    /// numeric values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: std::env::var("GARAGEBOOK_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout_secs: std::env::var("GARAGEBOOK_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            download_stagger_ms: std::env::var("GARAGEBOOK_DOWNLOAD_STAGGER_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.download_stagger_ms),
            default_owner: std::env::var("GARAGEBOOK_DEFAULT_OWNER").ok(),
            trace_level: std::env::var("GARAGEBOOK_TRACE_LEVEL").ok(),
        }
    }

    /// Loads a configuration from a TOML file.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`GaragebookError::Config`] when the file cannot be read or
    /// does not parse as TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GaragebookError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&contents)
            .map_err(|e| GaragebookError::Config(format!("invalid config {}: {e}", path.display())))
    }
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from the
/// configuration's `trace_level`, otherwise `info`. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_tracing(config: &Config) {
    let fallback = config.trace_level.as_deref().unwrap_or("info");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
