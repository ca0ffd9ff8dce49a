//! Error types for the router.
//!
//! Every variant here is recoverable at the request level: the router turns
//! it into a 500 response instead of failing the invocation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// The invocation payload is not a gateway event.
    #[error("invalid gateway event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    #[error("invalid status code: {0:?}")]
    InvalidStatus(String),

    /// A role that must always answer asked for the origin instead.
    #[error("{0} handler returned a request instead of a response")]
    RequestedOrigin(&'static str),

    #[error("default handler did not produce a response in the origin-response phase")]
    ResponsePhaseNotAnswered,

    #[error("request for {0} has no origin to fetch from")]
    MissingOrigin(String),

    #[error("invalid base64 response body: {0}")]
    InvalidBody(#[from] base64::DecodeError),

    #[error("{role} handler failed: {source:#}")]
    Handler {
        role: &'static str,
        source: anyhow::Error,
    },
}

/// Convenience result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;
