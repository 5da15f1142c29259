//! In-memory storage

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// Process-local storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_then_get_returns_value() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set_item("a", "1")?;

        assert_eq!(storage.get_item("a")?.as_deref(), Some("1"));
        assert_eq!(storage.len(), 1);

        Ok(())
    }

    #[test]
    fn set_overwrites_previous_value() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set_item("a", "1")?;
        storage.set_item("a", "2")?;

        assert_eq!(storage.get_item("a")?.as_deref(), Some("2"));

        Ok(())
    }

    #[test]
    fn remove_missing_key_is_ok() -> TestResult {
        let storage = MemoryStorage::new();

        storage.remove_item("missing")?;

        assert!(storage.is_empty());

        Ok(())
    }
}
