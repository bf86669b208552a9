//! Remote inventory API abstraction.
//!
//! This module defines the [`InventoryApi`] trait that abstracts over the remote
//! inventory service. The orchestrator and search coordinator are written against
//! this trait, which keeps them testable with in-memory fakes and leaves the
//! reqwest-backed implementation as one interchangeable backend.
//!
//! # Design Philosophy
//!
//! The trait is minimal and mirrors the actual endpoints the application calls,
//! not a generic repository. Each method is a single request with no retries;
//! the caller decides whether to surface or retry a failure.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::{Car, CarDraft, CarSearchHit, FileEntry, Item};

/// Abstraction over the remote inventory API.
///
/// Implementations must perform exactly one request attempt per call and map
/// failures into the crate's error taxonomy: transport failures become
/// [`Network`](crate::domain::GaragebookError::Network), payload rejections
/// become [`Validation`](crate::domain::GaragebookError::Validation), and any
/// other non-2xx response becomes
/// [`Server`](crate::domain::GaragebookError::Server).
///
/// # Implementations
///
/// - [`HttpInventoryClient`](crate::client::HttpInventoryClient): reqwest-backed
///   client against a configured base URL (default)
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Fetches the complete item list.
    ///
    /// The returned snapshot is what the store is replaced with after every
    /// successful mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn list(&self) -> Result<Vec<Item>>;

    /// Creates a new item. The server assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the payload is rejected, or the usual
    /// transport/server errors.
    async fn create(&self, item: &Item) -> Result<Item>;

    /// Updates an existing item by id.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` — before any network I/O — when `id` is empty.
    /// Returns `Server` with status 404 when the id is unknown.
    async fn update(&self, id: &str, item: &Item) -> Result<Item>;

    /// Deletes an item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a successful delete returns 204
    /// with no body.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Searches top-level items by term.
    ///
    /// An empty term is legal; the server decides whether that matches all
    /// or none.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn search_items(&self, term: &str) -> Result<Vec<Item>>;

    /// Searches classic cars by term, returning each car with its flat
    /// category and file arrays for client-side aggregation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn search_cars(&self, term: &str) -> Result<Vec<CarSearchHit>>;

    /// Searches files by term.
    ///
    /// The file kind is currently not enabled by default callers, but the
    /// endpoint is live so the search coordinator can fan out to it without
    /// restructuring.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn search_files(&self, term: &str) -> Result<Vec<FileEntry>>;

    /// Creates a classic car listing.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the payload is rejected, or the usual
    /// transport/server errors.
    async fn create_car(&self, draft: &CarDraft) -> Result<Car>;
}
