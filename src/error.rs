use std::time::Duration;
use thiserror::Error;

/// Result type for speaker operations
pub type Result<T> = std::result::Result<T, KefError>;

/// Errors that can occur when talking to a KEF speaker
///
/// A value that the speaker simply does not report is not an error; those
/// operations return `Ok(None)`.
#[derive(Error, Debug)]
pub enum KefError {
    /// Bad operation input, rejected before any request is made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request to the speaker failed or its response could not be used
    #[error("Transport error for {endpoint}: {cause}")]
    Transport {
        /// Full request URL (or the setting path for non-HTTP transports)
        endpoint: String,
        /// Underlying cause
        #[source]
        cause: TransportCause,
    },

    /// The speaker protocol has no known request for this operation
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl KefError {
    pub(crate) fn transport(endpoint: impl Into<String>, cause: impl Into<TransportCause>) -> Self {
        KefError::Transport {
            endpoint: endpoint.into(),
            cause: cause.into(),
        }
    }

    /// Whether the caller should treat the speaker as offline
    pub fn is_unreachable(&self) -> bool {
        matches!(self, KefError::Transport { .. })
    }

    /// The endpoint of a transport failure, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            KefError::Transport { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }
}

/// Why a request to the speaker failed
#[derive(Error, Debug)]
pub enum TransportCause {
    /// HTTP client error (connection refused, DNS, body read...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No complete response within the configured timeout
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Speaker answered with a non-success status code
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Response body is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope carries a type tag this crate does not know
    #[error("unknown value type `{0}`")]
    UnknownValueType(String),

    /// Envelope carries a known type tag other than the one requested
    #[error("expected value type `{expected}`, found `{found}`")]
    UnexpectedValueType {
        expected: &'static str,
        found: String,
    },

    /// Value field present but of the wrong JSON kind
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// Request URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
