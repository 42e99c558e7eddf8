//! Error types for the asset tracker.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors: the collection file and the item store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not an asset description file: {0}")]
    Format(PathBuf),

    #[error("Malformed asset description file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{0} exists, cannot continue unless instructed (--force)")]
    AlreadyExists(PathBuf),

    #[error("Directory {0} does not exist, cannot continue unless instructed (--mkdir)")]
    MissingDirectory(PathBuf),

    #[error("Item not found: {0}")]
    ItemNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Wrap an I/O error with a message naming the path involved.
    pub(crate) fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        StorageError::IoError(std::io::Error::new(err.kind(), format!("{}: {}", context, err)))
    }
}

/// Errors raised by asset operations (resolution and mutation).
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Could not resolve asset path uniquely: {0}")]
    AmbiguousPath(String),

    #[error("Could not resolve asset path: {0}")]
    NotFound(String),

    #[error("An item with alias '{alias}' and tags [{tags}] already exists here, cannot continue")]
    Duplicate { alias: String, tags: String },

    #[error("Cannot remove asset {0} with children unless `--recursive` is specified")]
    HasChildren(String),

    #[error("Cannot place asset {node} under {parent}: the parent is the asset itself or one of its descendants")]
    Cycle { node: String, parent: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<config::ConfigError> for AssetError {
    fn from(err: config::ConfigError) -> Self {
        AssetError::ConfigError(err.to_string())
    }
}
