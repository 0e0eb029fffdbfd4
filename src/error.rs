//! Error types, one enum per layer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the maze resource.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The maze file does not exist.
    #[error("maze file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other read failure.
    #[error("could not read maze file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures in the user record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Empty value or one containing a record delimiter.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Failures while playing a single maze.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("maze {0} has no start cell")]
    NoStart(usize),

    #[error("terminal io error: {0}")]
    Io(#[from] std::io::Error),
}
