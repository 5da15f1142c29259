//! Cart
//!
//! Every operation reloads the booking from its store, applies one change and writes
//! the whole collection back. Nothing is cached between calls, so the store stays the
//! single source of truth even when another page wrote to it in between.

use thiserror::Error;
use tracing::debug;

use crate::{
    items::{LineItem, PriceError, parse_price},
    store::{BookingStore, Storage, StoreError},
};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The price given for a new item could not be used.
    #[error("cannot add {name:?}: {source}")]
    InvalidPrice {
        /// Name of the item being added
        name: String,

        /// Why the price was rejected
        source: PriceError,
    },

    /// Wrapped store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cart operations over a [`BookingStore`].
#[derive(Debug, Clone)]
pub struct Cart<S> {
    store: BookingStore<S>,
}

impl<S: Storage> Cart<S> {
    /// Create a cart backed by `store`.
    pub fn new(store: BookingStore<S>) -> Self {
        Self { store }
    }

    /// The store this cart reads and writes.
    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    /// Current items, freshly loaded.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if the booking cannot be loaded.
    pub fn items(&self) -> Result<Vec<LineItem>, CartError> {
        Ok(self.store.load()?)
    }

    /// Add one unit of `name`.
    ///
    /// An item already in the cart keeps the price it was first added with; only its
    /// quantity grows. A new item is appended with a quantity of one. Returns the item
    /// as stored.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidPrice`]: `name` is new and `price` is not a non-negative
    ///   decimal. Nothing is written.
    /// - [`CartError::Store`]: the booking cannot be loaded or saved.
    pub fn add_item(&self, name: &str, price: &str) -> Result<LineItem, CartError> {
        let mut items = self.store.load()?;

        let added = if let Some(existing) = items.iter_mut().find(|item| item.name == name) {
            existing.quantity = existing.quantity.saturating_add(1);
            existing.clone()
        } else {
            let price = parse_price(price).map_err(|source| CartError::InvalidPrice {
                name: name.to_string(),
                source,
            })?;

            let item = LineItem::new(name, price);
            items.push(item.clone());
            item
        };

        self.store.save(&items)?;

        debug!(name, quantity = added.quantity, "added item to booking");

        Ok(added)
    }

    /// Remove every line named `name`. Removing an absent item leaves the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if the booking cannot be loaded or saved.
    pub fn remove_item(&self, name: &str) -> Result<(), CartError> {
        let mut items = self.store.load()?;

        items.retain(|item| item.name != name);

        self.store.save(&items)?;

        debug!(name, remaining = items.len(), "removed item from booking");

        Ok(())
    }

    /// Set the quantity of `name`, raising anything below one to one.
    ///
    /// Returns `false`, without writing, when no item is named `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if the booking cannot be loaded or saved.
    pub fn update_quantity(&self, name: &str, quantity: i64) -> Result<bool, CartError> {
        let mut items = self.store.load()?;

        let Some(item) = items.iter_mut().find(|item| item.name == name) else {
            return Ok(false);
        };

        item.quantity = floor_quantity(quantity);

        let quantity = item.quantity;

        self.store.save(&items)?;

        debug!(name, quantity, "updated booking quantity");

        Ok(true)
    }

    /// Empty the cart by removing the stored booking.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Store`] if the booking cannot be removed.
    pub fn clear(&self) -> Result<(), CartError> {
        self.store.clear()?;

        debug!(key = self.store.key(), "cleared booking");

        Ok(())
    }
}

fn floor_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
