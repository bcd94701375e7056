//! Error types for the upload side of the crate.
//!
//! Conversion itself never fails; only talking to Notion and reading input
//! files can.

use thiserror::Error;

/// Errors returned by [`crate::api::NotionClient`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion answered with a non-success status.
    #[error("notion rejected request ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the publishing pipeline.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No parent page could be found for the given hint.
    #[error("no parent page found for '{0}', provide a parent page id")]
    DestinationNotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
