//! Page
//!
//! Ties the cart, the renderer and the host UI together. Hosts translate their input
//! events into [`Action`]s and hand them to [`BookingPage::dispatch`].

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError},
    config::{BookingConfig, ConfigError, Messages},
    items::LineItem,
    render::{BookingSurface, RenderError, Renderer, Rendering},
    store::{BookingStore, Storage},
};

/// Errors raised while handling a page action.
#[derive(Debug, Error)]
pub enum PageError {
    /// The cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The re-render after the operation failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A user intent coming from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A catalog "add" button was pressed.
    Add {
        /// Item name
        name: String,

        /// Price text as found on the button
        price: String,
    },

    /// A row's quantity was changed to a valid value.
    UpdateQuantity {
        /// Item name
        name: String,

        /// Requested quantity, stored as at least one
        quantity: i64,
    },

    /// A row's removal control was pressed.
    Remove {
        /// Item name
        name: String,
    },

    /// The submit button was pressed.
    Submit,
}

/// Shows short confirmations to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Show `message`.
    fn notify(&self, message: &str);
}

/// The booking widget on one page: a cart, the surface it is shown on and a notifier.
#[derive(Debug)]
pub struct BookingPage<S, V, N> {
    cart: Cart<S>,
    renderer: Renderer,
    messages: Messages,
    surface: V,
    notifier: N,
}

impl<S, V, N> BookingPage<S, V, N>
where
    S: Storage,
    V: BookingSurface,
    N: Notifier,
{
    /// Build a page from `config`, storing the booking in `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the configured currency is not supported.
    pub fn new(
        config: &BookingConfig,
        storage: S,
        surface: V,
        notifier: N,
    ) -> Result<Self, ConfigError> {
        let store = BookingStore::with_key(storage, config.storage_key.clone());
        let renderer = Renderer::new(config.currency()?, config.messages.empty.clone());

        Ok(Self {
            cart: Cart::new(store),
            renderer,
            messages: config.messages.clone(),
            surface,
            notifier,
        })
    }

    /// The cart behind this page.
    pub fn cart(&self) -> &Cart<S> {
        &self.cart
    }

    /// Handle one action.
    ///
    /// Adding confirms through the notifier without re-rendering. Removing, a quantity
    /// change on a listed item and submitting re-render the booking.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] if the cart operation or the re-render fails.
    pub fn dispatch(&mut self, action: Action) -> Result<(), PageError> {
        debug!(?action, "dispatching booking action");

        match action {
            Action::Add { name, price } => {
                self.add_item(&name, &price)?;
            }
            Action::UpdateQuantity { name, quantity } => {
                if self.cart.update_quantity(&name, quantity)? {
                    self.render()?;
                }
            }
            Action::Remove { name } => {
                self.cart.remove_item(&name)?;
                self.render()?;
            }
            Action::Submit => self.submit()?,
        }

        Ok(())
    }

    /// Add one unit of `name` and confirm it to the user.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the price is invalid or the booking cannot be saved.
    pub fn add_item(&mut self, name: &str, price: &str) -> Result<LineItem, CartError> {
        let item = self.cart.add_item(name, price)?;

        self.notifier.notify(&self.messages.added_message(name));

        Ok(item)
    }

    /// Confirm the submission, empty the cart and re-render.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] if the booking cannot be cleared or re-rendered.
    pub fn submit(&mut self) -> Result<(), PageError> {
        self.notifier.notify(&self.messages.submitted);
        self.cart.clear()?;

        info!("booking submitted");

        self.render()?;

        Ok(())
    }

    /// Render the stored booking onto the surface.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the booking cannot be loaded or shown.
    pub fn render(&mut self) -> Result<Option<Rendering>, RenderError> {
        self.renderer.render(self.cart.store(), &mut self.surface)
    }
}
