use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Coarse classification callers use to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received (DNS, connect, timeout, interrupted body).
    Network,
    /// The server answered with an error status or an unreadable body.
    Response,
    /// The request could not be built or was never sent.
    Request,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        body: Option<serde_json::Value>,
        headers: HeaderMap,
    },

    #[error("could not decode response body (status {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    Request(String),

    #[error("could not serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),

    /// The cause is shared by every request that waited on the same failed renewal.
    #[error("session expired: {0}")]
    SessionExpired(#[source] Arc<Error>),
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Network(_) => FailureKind::Network,
            Error::Status { .. } | Error::Decode { .. } => FailureKind::Response,
            Error::Request(_) | Error::Serialize(_) | Error::Config(_) | Error::Io(_) => {
                FailureKind::Request
            }
            Error::SessionExpired(cause) => cause.kind(),
        }
    }

    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } | Error::Decode { status, .. } => Some(*status),
            Error::SessionExpired(cause) => cause.status(),
            _ => None,
        }
    }

    /// Parsed JSON error body, when the server sent one.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Status { body, .. } => body.as_ref(),
            Error::SessionExpired(cause) => cause.body(),
            _ => None,
        }
    }

    /// True only for a direct 401 response, never for a wrapped refresh failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Request(err.to_string())
        } else {
            Error::Network(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err)
    }
}
