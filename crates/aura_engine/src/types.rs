use std::fmt;

use aura_core::{Batch, Job, SearchState};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The user's batch was fetched or created.
    BatchLoaded(Batch),
    /// No batch was available; the plain job listing was loaded instead.
    JobsLoaded(Vec<Job>),
    BatchFailed(ApiError),
    /// Visible search state changed (request issued, settled or cleared).
    SearchUpdated(SearchState),
}

/// Response of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    /// Body did not match the expected JSON shape.
    Decode,
    /// Call needs a bearer token and none is configured.
    Unauthenticated,
    /// Server answered 2xx without acknowledging the write.
    Rejected,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Unauthenticated => write!(f, "not signed in"),
            FailureKind::Rejected => write!(f, "rejected"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}
