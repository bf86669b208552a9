//! Domain layer for the garagebook client.
//!
//! This module contains the core domain types for the crate, independent of the
//! HTTP transport or any presentation concern. Wire-facing records live here
//! because their defaulting rules (missing arrays decode as empty, ids are
//! optional until persisted) are part of the domain contract, not a transport
//! detail.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`item`]: Top-level inventory items (tires, cars)
//! - [`car`]: Nested car records (categories, files, search hit shapes)

pub mod car;
pub mod error;
pub mod item;

pub use car::{Car, CarDraft, CarSearchHit, Category, FileEntry};
pub use error::{GaragebookError, Result};
pub use item::{CarAttrs, Item, ItemAttrs, TireAttrs};
