use std::fmt;

use recipebox_core::{Recipe, RecipeId, RemoteFailure, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classification used by the state machine.
    pub fn to_remote_failure(&self) -> RemoteFailure {
        match &self.kind {
            FailureKind::NotFound => RemoteFailure::NotFound,
            FailureKind::Backend { code } => RemoteFailure::Validation { code: code.clone() },
            FailureKind::Decode => RemoteFailure::Unknown(self.message.clone()),
            FailureKind::InvalidUrl
            | FailureKind::Network
            | FailureKind::Timeout
            | FailureKind::HttpStatus(_) => RemoteFailure::Transport(self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    NotFound,
    HttpStatus(u16),
    /// The backend answered with `{"error": code}`.
    Backend { code: String },
    Decode,
}

impl FailureKind {
    /// Machine-readable kind string.
    pub fn code(&self) -> &str {
        match self {
            FailureKind::InvalidUrl => "INVALID_URL",
            FailureKind::Network | FailureKind::Timeout | FailureKind::HttpStatus(_) => {
                "TRANSPORT"
            }
            FailureKind::NotFound => "NOT_FOUND",
            FailureKind::Backend { code } => code,
            FailureKind::Decode => "DECODE",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Backend { code } => write!(f, "backend error {code}"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

/// A backend call the executor can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    FetchCollection,
    FetchRecipe(RecipeId),
    Submit(String),
    Update(RecipeId, Box<Recipe>),
    Remove(RecipeId),
}

/// Result of an `Operation`, one variant per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Collection(Result<Vec<Recipe>, ClientError>),
    Fetched(Result<Recipe, ClientError>),
    Submitted(Result<Recipe, ClientError>),
    Updated(Result<Recipe, ClientError>),
    Removed(Result<(), ClientError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Completed { request: RequestId, outcome: Outcome },
}
