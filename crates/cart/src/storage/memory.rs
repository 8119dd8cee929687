//! In-memory storage backend.

use std::collections::HashMap;

use super::{Storage, StorageError};

/// A `HashMap`-backed [`Storage`].
///
/// Supports an optional byte quota (summed key and value lengths across all
/// entries) and can be switched to an unavailable state, which makes every
/// call fail the way disabled browser storage does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail (or succeed again).
    pub const fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Bytes currently used by all entries.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "storage is disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        if let Some(limit) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let requested = self.used_bytes() - existing + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded { limit, requested });
            }
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.entries.remove(key);
        Ok(())
    }
}
