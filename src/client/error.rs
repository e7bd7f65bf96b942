//! Error types for the client services.

use thiserror::Error;

use super::account::AccountErrors;

/// Errors raised by client services.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL or request path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Session storage failure.
    #[error("session storage error: {0}")]
    Session(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server rejected an account request.
    #[error("account rejected: {0}")]
    Account(AccountErrors),

    /// Non-success response from the server.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for client services.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
