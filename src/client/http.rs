//! Reqwest-backed inventory API client.
//!
//! This module implements [`InventoryApi`] against a configured base URL. It is
//! a thin request-shaping layer: endpoint paths, JSON decoding, and mapping of
//! HTTP failures into the crate's error taxonomy. No business logic, no retries,
//! one attempt per call.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::backend::InventoryApi;
use crate::domain::error::{GaragebookError, Result};
use crate::domain::{Car, CarDraft, CarSearchHit, FileEntry, Item};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("garagebook/", env!("CARGO_PKG_VERSION"));

/// Envelope of the aggregated car search response.
#[derive(Debug, Deserialize)]
struct CarsEnvelope {
    #[serde(default)]
    cars: Vec<CarSearchHit>,
}

/// Envelope of the file search response.
#[derive(Debug, Deserialize)]
struct FilesEnvelope {
    #[serde(default)]
    files: Vec<FileEntry>,
}

/// HTTP client for the remote inventory API.
///
/// Holds one pooled `reqwest::Client` with a fixed timeout. The base URL is the
/// single piece of external configuration, e.g. `http://localhost:4000/api`.
#[derive(Debug)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Creates a client against the given base URL.
    ///
    /// The URL is validated eagerly so a typo in configuration fails at startup
    /// rather than on the first request. A trailing slash is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the base URL does not parse or the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| GaragebookError::Config(format!("invalid base URL {base_url:?}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GaragebookError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends a request and decodes the JSON body, mapping failures into the
    /// error taxonomy.
    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GaragebookError::Network(format!("failed to read response body: {e}")))?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GaragebookError::Server {
            status,
            message: format!("failed to decode response body: {e}"),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(into_network_error)?;

        Self::decode_json(response).await
    }
}

/// Maps a transport-level failure (no response observed) into `Network`.
fn into_network_error(e: reqwest::Error) -> GaragebookError {
    if e.is_timeout() {
        GaragebookError::Network(format!("request timed out: {e}"))
    } else {
        GaragebookError::Network(e.to_string())
    }
}

/// Classifies a non-2xx response into the error taxonomy.
///
/// A payload rejection (400 or 422 carrying a structured `message`/`error`
/// field) becomes `Validation`; every other failure status becomes `Server`.
/// The message falls back to the raw body, then to the bare status code.
fn classify_failure(status: u16, body: &str) -> GaragebookError {
    let structured_message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    let message = structured_message.clone().unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("HTTP {status}")
        } else {
            trimmed.to_string()
        }
    });

    if matches!(status, 400 | 422) && structured_message.is_some() {
        GaragebookError::Validation { status, message }
    } else {
        GaragebookError::Server { status, message }
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryClient {
    async fn list(&self) -> Result<Vec<Item>> {
        self.get_json("items", &[]).await
    }

    async fn create(&self, item: &Item) -> Result<Item> {
        let url = self.endpoint("items");
        tracing::debug!(url = %url, "POST item");

        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(into_network_error)?;

        Self::decode_json(response).await
    }

    async fn update(&self, id: &str, item: &Item) -> Result<Item> {
        // Caller-side misuse; never issue the request.
        if id.trim().is_empty() {
            return Err(GaragebookError::Precondition("item id is missing".to_string()));
        }

        let url = self.endpoint(&format!("items/{id}"));
        tracing::debug!(url = %url, "PUT item");

        let response = self
            .client
            .put(&url)
            .json(item)
            .send()
            .await
            .map_err(into_network_error)?;

        Self::decode_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("items/{id}"));
        tracing::debug!(url = %url, "DELETE item");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(into_network_error)?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| GaragebookError::Network(format!("failed to read response body: {e}")))?;
        Err(classify_failure(status, &body))
    }

    async fn search_items(&self, term: &str) -> Result<Vec<Item>> {
        self.get_json("items/search", &[("term", term)]).await
    }

    async fn search_cars(&self, term: &str) -> Result<Vec<CarSearchHit>> {
        let envelope: CarsEnvelope = self.get_json("search", &[("term", term)]).await?;
        Ok(envelope.cars)
    }

    async fn search_files(&self, term: &str) -> Result<Vec<FileEntry>> {
        let envelope: FilesEnvelope = self.get_json("search", &[("term", term)]).await?;
        Ok(envelope.files)
    }

    async fn create_car(&self, draft: &CarDraft) -> Result<Car> {
        let url = self.endpoint("classic-cars");
        tracing::debug!(url = %url, car_name = %draft.name, "POST classic car");

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(into_network_error)?;

        Self::decode_json(response).await
    }
}
