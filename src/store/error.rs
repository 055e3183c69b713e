use std::path::PathBuf;
use thiserror::Error;

use crate::core::ParseError;

/// Errors that can occur while loading, rewriting or caching layouts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Layout or cache file does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// The layout could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Failed to create the backup copy.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Cache file could not be encoded or decoded.
    #[error("Cache error: {0}")]
    Cache(#[from] serde_json::Error),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
