//! Error types for the garagebook client.
//!
//! This module defines the centralized error type [`GaragebookError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All errors
//! are implemented using the `thiserror` crate for automatic `Error` trait
//! implementation.
//!
//! The first six variants form the client-facing taxonomy: every failure a caller
//! can observe is one of them, and all of them are absorbed into a single
//! user-visible notification at the orchestrator/coordinator boundary. Nothing is
//! retried automatically.

use thiserror::Error;

/// The main error type for garagebook operations.
///
/// This enum consolidates all error conditions that can occur while talking to
/// the remote inventory API or managing local state. Variants carry enough
/// context to produce a one-line user notification.
#[derive(Debug, Error)]
pub enum GaragebookError {
    /// The request never reached the server, or no response arrived.
    ///
    /// Covers DNS failures, connection refusal, and timeouts. The string
    /// contains the transport-level description.
    #[error("Network error: {0}")]
    Network(String),

    /// The API returned a failure status.
    ///
    /// Any non-2xx response that is not a structured payload rejection.
    /// Carries the HTTP status and the response body (or status text when
    /// the body is empty or undecodable).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code of the failed response.
        status: u16,
        /// Server-provided failure message.
        message: String,
    },

    /// The server rejected the submitted payload.
    ///
    /// A 4xx response with a message, e.g. a missing required field on create
    /// or an unparseable price on update.
    #[error("Validation error ({status}): {message}")]
    Validation {
        /// HTTP status code of the rejection (4xx).
        status: u16,
        /// Server-provided description of what was rejected.
        message: String,
    },

    /// Caller misuse detected before any network I/O.
    ///
    /// Raised locally, e.g. when an update is attempted without an item id.
    /// No request is issued for a precondition failure.
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// A privileged action was attempted without privilege.
    ///
    /// Raised locally before any network call, e.g. delete without the admin
    /// flag set.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// A duplicate mutation was attempted on an identity already in flight.
    ///
    /// Prevents double submits (rapid double-click) from issuing two
    /// overlapping writes against the same item.
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local storage operation failed.
    ///
    /// Occurs when reading or writing the persisted selection file fails at the
    /// serialization level. The string describes what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the configured base URL cannot be parsed or a config file
    /// is malformed. The string describes the specific problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for garagebook operations.
///
/// This is a type alias for `std::result::Result<T, GaragebookError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, GaragebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_messages_are_one_liners() {
        let cases: Vec<(GaragebookError, &str)> = vec![
            (GaragebookError::Network("connection refused".into()), "Network error"),
            (
                GaragebookError::Server { status: 500, message: "boom".into() },
                "Server error (500)",
            ),
            (
                GaragebookError::Validation { status: 422, message: "price".into() },
                "Validation error (422)",
            ),
            (GaragebookError::Precondition("item id is missing".into()), "Precondition"),
            (GaragebookError::Authorization("admin access required".into()), "Authorization"),
            (GaragebookError::Conflict("mutation in flight".into()), "Conflict"),
        ];

        for (err, prefix) in cases {
            let rendered = err.to_string();
            assert!(rendered.starts_with(prefix), "unexpected message: {rendered}");
            assert!(!rendered.contains('\n'));
        }
    }
}
