//! Error types for the Migrator client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the provider API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client could not be configured (bad token, bad base URL)
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Writing a downloaded archive to disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if retrying the same request may succeed
    ///
    /// Timeouts, connection failures, 5xx responses and 429 rate limiting are
    /// transient. Everything else (auth, not found, malformed payloads) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::ParseError(_) | Self::InvalidConfig(_) | Self::Io(_) => false,
        }
    }
}
