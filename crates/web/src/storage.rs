//! Browser `localStorage` backend.

use booking::store::{Storage, StorageError};
use wasm_bindgen::JsValue;

/// [`Storage`] over the window's `localStorage`.
#[derive(Debug, Clone)]
pub(crate) struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// The local storage of `window`.
    pub(crate) fn from_window(window: &web_sys::Window) -> Result<Self, StorageError> {
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(js_error)
    }
}

fn js_error(error: JsValue) -> StorageError {
    StorageError::Unavailable(
        error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    )
}
