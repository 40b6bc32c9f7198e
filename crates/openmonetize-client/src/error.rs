//! Client error types.

use openmonetize_core::{ModelError, ValidationError};

/// Failures of the transport collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read
    /// (connection refused, timeout, TLS failure, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Short error label from the response body (e.g. `"Not Found"`).
        error: Option<String>,
        /// Human-readable message.
        message: String,
        /// Additional details, if the server sent any.
        details: Option<serde_json::Value>,
    },
}

impl TransportError {
    /// The HTTP status, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
        }
    }
}

/// Errors that can occur when using the OpenMonetize client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A model failed validation or its wire text was not valid JSON.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The transport failed or the server returned an error status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Model(err.into())
    }
}

impl ClientError {
    /// The HTTP status of a failed call, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}
