use std::fmt;

/// A failed backend call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Backend unreachable, timed out, or answered with an unexpected status.
    Transport(String),
    /// The referenced recipe does not exist.
    NotFound,
    /// The backend rejected the request with an error code such as `PARSE_FAILED`.
    Validation { code: String },
    /// A response the client could not make sense of.
    Unknown(String),
}

impl RemoteFailure {
    /// Machine-readable kind string.
    pub fn code(&self) -> &str {
        match self {
            RemoteFailure::Transport(_) => "TRANSPORT",
            RemoteFailure::NotFound => "NOT_FOUND",
            RemoteFailure::Validation { code } => code,
            RemoteFailure::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFailure::Transport(detail) => write!(f, "transport failure: {detail}"),
            RemoteFailure::NotFound => write!(f, "not found"),
            RemoteFailure::Validation { code } => write!(f, "rejected by backend: {code}"),
            RemoteFailure::Unknown(detail) => write!(f, "unrecognised failure: {detail}"),
        }
    }
}
