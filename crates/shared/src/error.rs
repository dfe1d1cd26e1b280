use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailureKind {
    /// Connection, DNS or body-read failure.
    Transport,
    /// The source answered with a non-2xx status.
    Status,
    /// The body was not a JSON array.
    MalformedBody,
}

/// The only error the course directory knows about: the collection could
/// not be fetched.
#[derive(Debug, Clone, Error)]
#[error("collection fetch failed ({kind:?}): {message}")]
pub struct CollectionFetchError {
    pub kind: FetchFailureKind,
    pub message: String,
}

impl CollectionFetchError {
    pub fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::Transport, message)
    }

    pub fn status(code: u16) -> Self {
        Self::new(
            FetchFailureKind::Status,
            format!("source responded with HTTP {code}"),
        )
    }

    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::MalformedBody, message)
    }
}
