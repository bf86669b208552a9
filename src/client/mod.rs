//! Remote Inventory Client: the typed wrapper around the inventory API.
//!
//! This layer does request shaping and error surfacing only. Everything with
//! actual data-shaping logic (aggregation, search fan-out, mutation sequencing)
//! lives above it and talks to the [`InventoryApi`] trait, never to reqwest
//! directly.
//!
//! # Modules
//!
//! - `backend`: the [`InventoryApi`] port trait
//! - `http`: reqwest-backed implementation against a configured base URL

pub mod backend;
pub mod http;

pub use backend::InventoryApi;
pub use http::HttpInventoryClient;
