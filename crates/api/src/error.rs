use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a search transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A required collaborator was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Failures of a single per-key matcher invocation.
///
/// The coordinator logs these and moves on to the next key.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The key could not be compiled into a pattern.
    #[error("key '{key}' is not a valid pattern")]
    Pattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    /// The matcher gave up for a reason of its own.
    #[error("matcher failed: {0}")]
    Failed(String),
}

/// Failures of a key expander.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The expander has no backing data to consult.
    #[error("key expander is not available")]
    Unavailable,

    /// Reading the expander's backing file failed.
    #[error("failed to read expansion data from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The expander's backing file was not in the expected format.
    #[error("failed to parse expansion data from {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}
