//! Crate-level error types.

use std::fmt;

/// Errors produced by the sortlab crate.
///
/// Cancellation of a run is not an error and never appears here; see
/// [`Cancelled`](crate::emitter::Cancelled).
#[derive(Debug)]
pub enum SortlabError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the background sort worker.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Explanation service request or payload failure.
    Explanation(String),
    /// The control action is not allowed while a run is active.
    RunActive,
    /// Unknown algorithm name.
    InvalidAlgorithm(String),
}

impl fmt::Display for SortlabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Explanation(msg) => {
                write!(f, "explanation service error: {msg}")
            }
            Self::RunActive => {
                write!(f, "not allowed while a sort is in progress")
            }
            Self::InvalidAlgorithm(name) => {
                write!(f, "unknown sorting algorithm: {name}")
            }
        }
    }
}

impl std::error::Error for SortlabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SortlabError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
