/// Typed failures reported by `KeyValueStore` implementations.
use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be opened at all.
    #[error("Storage unavailable at {path}: {message}")]
    Unavailable { path: PathBuf, message: String },

    /// A single operation against an open backend failed.
    #[error("Storage {op} failed for key '{key}': {message}")]
    Backend {
        op: &'static str,
        key: String,
        message: String,
    },
}

impl StoreError {
    pub(crate) fn backend(op: &'static str, key: &str, err: anyhow::Error) -> Self {
        Self::Backend {
            op,
            key: key.to_string(),
            message: format!("{err:#}"),
        }
    }
}
