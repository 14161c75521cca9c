//! Client error types.

use sst_core::CoreError;
use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// No token is stored and the client is configured to require one.
    #[error("not authenticated — run `sst auth login`")]
    NotAuthenticated,

    /// The server answered 401. The stored token has been cleared.
    #[error("session expired or not authorized — run `sst auth login`")]
    Unauthorized,

    /// Any other non-success status.
    #[error("server rejected the request (status {status}): {message}")]
    Api {
        status: u16,
        /// Raw response body.
        message: String,
    },

    /// Connection refused, DNS, TLS or body read failure.
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// A body was missing or did not have the expected shape.
    #[error("unexpected response from server: {0}")]
    Malformed(String),

    /// A draft failed validation before any request was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Errors from the PGR navigator: either the selection rules or the request.
#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error(transparent)]
    Selection(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Errors from [`crate::mirror::LocalMirror`]'s strict read/write calls.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("mirror I/O failed for {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mirror file {path} is not valid JSON: {source}")]
    Json {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
