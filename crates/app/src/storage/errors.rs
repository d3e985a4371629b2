//! Storage errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors from device storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is empty or has characters outside `[A-Za-z0-9_-]`.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// A stored value could not be read.
    #[error("failed to read {path}")]
    Read {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A value could not be written.
    #[error("failed to write {path}")]
    Write {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
