//! Error types for fs-transact.
//!
//! All operations return `Result<T>` which aliases `Result<T, TransactError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from tool operations and script execution.
#[derive(Debug, Error)]
pub enum TransactError {
    /// File does not exist.
    #[error("File does not exist at path: {0}")]
    FileNotFound(PathBuf),

    /// Path exists but is not a regular file.
    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    /// Directory does not exist.
    #[error("Directory does not exist at path: {0}")]
    DirectoryNotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file occupies the path where a directory was requested.
    #[error("A file already exists at path: {0}")]
    FileExists(PathBuf),

    /// Refusing to delete a non-empty directory without `recursive`.
    #[error("Directory is not empty: {0}")]
    DirectoryNotEmpty(PathBuf),

    /// A line in an apply script could not be parsed.
    #[error("Invalid script line {line}: {reason}")]
    Script { line: usize, reason: String },

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for fs-transact operations.
pub type Result<T> = std::result::Result<T, TransactError>;
