//! Error types for the update flow.

use thiserror::Error;

/// Errors that can occur while checking for, downloading, or installing an
/// update.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpdateError {
    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("server returned status {status}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
    },

    /// Download finished without delivering a single byte.
    #[error("empty response body")]
    EmptyBody,

    /// I/O error while writing the package file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to parse the version manifest.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// OS refused to hand the package to an installer.
    #[error("installation error: {0}")]
    Install(String),
}

impl UpdateError {
    /// Returns a short message suitable for display in a notification.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the update server. Check your connection.",
            Self::Server { .. } => "The update server rejected the request.",
            Self::EmptyBody => "The update server sent an empty package.",
            Self::Io(_) => "Could not write the update package to disk.",
            Self::JsonParse(_) => "The update server sent an unreadable response.",
            Self::Install(_) => "Could not hand the package to the installer.",
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for UpdateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for UpdateError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;
