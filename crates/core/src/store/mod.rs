//! Store
//!
//! Persists the booking as a single JSON document under one key of a string key-value
//! [`Storage`]. Every write replaces the whole collection.

use std::{io, rc::Rc};

use thiserror::Error;

use crate::items::LineItem;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Default storage key, shared with pages that already hold a booking.
pub const DEFAULT_STORAGE_KEY: &str = "bookingItems";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error from a file-backed store.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The backend refused the operation (quota exceeded, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage, the shape of a browser's `localStorage`.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Errors raised while loading or saving the booking.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapped storage backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored document is not a valid booking.
    #[error("stored booking is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Reads and writes the booking under a fixed storage key.
#[derive(Debug, Clone)]
pub struct BookingStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> BookingStore<S> {
    /// Create a store over `storage` using [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store over `storage` using a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored items, or an empty list when nothing is stored.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Storage`]: the backend could not be read.
    /// - [`StoreError::Corrupt`]: the stored value is not a JSON array of items.
    pub fn load(&self) -> Result<Vec<LineItem>, StoreError> {
        match self.storage.get_item(&self.key)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored items with `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if serialization or the backend write fails.
    pub fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        let data = serde_json::to_string(items)?;

        self.storage.set_item(&self.key, &data)?;

        Ok(())
    }

    /// Remove the stored booking entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend write fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.key)?;

        Ok(())
    }
}
