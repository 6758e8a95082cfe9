//! Error types for the blackjack-rl crate

use thiserror::Error;

/// Main error type for the blackjack-rl crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state key '{key}' is outside the enumerable state space")]
    UnknownState { key: String },

    #[error("snapshot has {got} table blocks, expected {expected}")]
    SnapshotBlockCount { expected: usize, got: usize },

    #[error("malformed snapshot line '{line}' (expected '(i,j,k) value')")]
    MalformedSnapshotLine { line: String },

    #[error("malformed state key '{key}' (expected '(i,j,k)' with integer fields)")]
    MalformedStateKey { key: String },

    #[error("malformed value token '{token}' (expected a finite number or '[a,b]')")]
    MalformedValue { token: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
