//! Key-value storage backends.
//!
//! The cart persists a single string value under a fixed key. [`Storage`]
//! mirrors the browser's local storage: synchronous, string-valued, and
//! allowed to fail (disabled storage, quota exceeded, I/O errors).
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map with optional quota and failure injection
//! - [`FileStorage`] - one JSON file per key under a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's quota.
    #[error("Storage quota exceeded: {requested} bytes requested, limit is {limit}")]
    QuotaExceeded {
        /// Maximum bytes the backend accepts.
        limit: usize,
        /// Bytes the rejected write would have used.
        requested: usize,
    },

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A synchronous, string-valued key-value store.
pub trait Storage {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected or fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::QuotaExceeded {
            limit: 10,
            requested: 42,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: 42 bytes requested, limit is 10"
        );

        let err = StorageError::Unavailable("disabled".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: disabled");
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        assert!(storage.set_item("k", "v").is_ok());
        assert_eq!(storage.get_item("k").ok().flatten().as_deref(), Some("v"));
    }
}
