//! Error types for the notehub crates.

use thiserror::Error;

/// Result type alias using notehub's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notehub operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration missing or malformed at startup. Fatal: the
    /// client refuses to construct rather than issue unauthenticated
    /// requests the remote API would reject anyway.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed. Carries the response status when one
    /// was received; `status` is `None` for transport failures (DNS,
    /// timeout, connection reset).
    #[error("Request error: {message}")]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// Local pre-flight rejection of out-of-contract input. Never sent to
    /// the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Convenience constructor for a request error with a status code.
    pub fn request(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        Error::Request {
            status: status.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request {
            status: e.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
