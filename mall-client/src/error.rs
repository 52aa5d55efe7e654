//! Client error types.

use thiserror::Error;

/// Errors surfaced by client calls.
///
/// There is no retry or fallback behind any variant; a failed call is
/// reported as-is and the scenario decides (via the negative-path helper)
/// whether failure was the expected outcome.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be used to build requests.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Transport-level failure: connect, timeout, TLS.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request. Carries the decoded error
    /// envelope when one was present.
    #[error("api rejected {method} {path}: {status} {code}: {message}")]
    Api {
        method: &'static str,
        path: String,
        status: u16,
        code: String,
        message: String,
    },

    /// A 2xx response did not decode into the expected shape.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
