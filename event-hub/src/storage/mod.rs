//! Local key-value store
//!
//! Device-local persistence for client-owned state (notification read state).
//! Values are opaque strings; callers decide the encoding.
//!
//! - [`FileStore`] - one file per key under a directory
//! - [`MemoryStore`] - in-process map, for tests and ephemeral sessions

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => AppError::with_message(ErrorCode::StorageWriteFailed, e.to_string()),
            StorageError::InvalidKey(key) => {
                AppError::new(ErrorCode::StorageKeyInvalid).with_detail("key", key)
            }
        }
    }
}

/// Synchronous string store keyed by name
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
