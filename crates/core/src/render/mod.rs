//! Render
//!
//! Rendering happens in two steps. [`Renderer::project`] turns the loaded items into a
//! [`Rendering`], a plain value with no side effects. A [`BookingSurface`] then puts
//! that value on screen and binds the row handlers to its own input events.
//!
//! Row handlers carry the item name, never a position, so a handler kept from an
//! older rendering still acts on the right item after rows were removed.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::trace;

use crate::{
    items::LineItem,
    page::Action,
    pricing::{TotalsError, format_amount, format_price, totals},
    store::{BookingStore, Storage, StoreError},
};

pub mod text;

/// Errors raised by a surface while presenting a rendering.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Writing to a text output failed.
    #[error("failed to write booking: {0}")]
    Io(#[from] std::io::Error),

    /// The host UI rejected an update.
    #[error("failed to update booking page: {0}")]
    Host(String),
}

/// Errors raised while rendering the booking.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The booking could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Totals could not be computed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// The surface failed to present the rendering.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// The regions a booking is shown in: an item listing and a summary with totals.
pub trait BookingSurface {
    /// Whether the listing, summary, total-items and total-price regions all exist.
    ///
    /// Rendering is skipped without error when this returns `false`.
    fn has_regions(&self) -> bool;

    /// Replace the listing with `message` and hide the summary.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the host rejects the update.
    fn show_empty(&mut self, message: &str) -> Result<(), SurfaceError>;

    /// Replace the listing with `rows` and show `summary`.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the host rejects the update.
    fn show_listing(&mut self, rows: &[RowView], summary: &SummaryView)
    -> Result<(), SurfaceError>;
}

/// Handles edits to a row's quantity input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityHandler {
    name: String,
    previous: u32,
}

impl QuantityHandler {
    /// Handler for the row named `name`, currently showing `previous`.
    pub fn new(name: impl Into<String>, previous: u32) -> Self {
        Self {
            name: name.into(),
            previous,
        }
    }

    /// Quantity to put back into the input when an edit is rejected.
    pub fn previous(&self) -> u32 {
        self.previous
    }

    /// The update for a new input value, or `None` when the input should be reverted.
    ///
    /// Only whole numbers from one up to `u32::MAX` are accepted.
    pub fn action_for(&self, input: &str) -> Option<Action> {
        let quantity = input.trim().parse::<u32>().ok().filter(|&q| q >= 1)?;

        Some(Action::UpdateQuantity {
            name: self.name.clone(),
            quantity: i64::from(quantity),
        })
    }
}

/// Handles a row's removal control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveHandler {
    name: String,
}

impl RemoveHandler {
    /// Handler for the row named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The removal to dispatch when the control is activated.
    pub fn action(&self) -> Action {
        Action::Remove {
            name: self.name.clone(),
        }
    }
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Item name.
    pub name: String,

    /// Unit price with currency symbol, e.g. `$9.99`.
    pub price: String,

    /// Value the quantity input is prefilled with.
    pub quantity: u32,

    /// Handler for the quantity input.
    pub on_quantity: QuantityHandler,

    /// Handler for the removal control.
    pub on_remove: RemoveHandler,
}

/// Totals shown in the summary region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    /// Total quantity across all rows.
    pub total_items: u64,

    /// Total price with two decimal places, e.g. `22.48`.
    pub total_price: String,
}

/// What a surface should show for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// No items: show `message`, hide the summary.
    Empty {
        /// Empty-state message
        message: String,
    },

    /// One row per item, followed by the summary.
    Listing {
        /// Rows in booking order
        rows: Vec<RowView>,

        /// Totals
        summary: SummaryView,
    },
}

/// Projects bookings into renderings and presents them on a surface.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: &'static Currency,
    empty_message: String,
}

impl Renderer {
    /// Create a renderer showing prices in `currency`.
    pub fn new(currency: &'static Currency, empty_message: impl Into<String>) -> Self {
        Self {
            currency,
            empty_message: empty_message.into(),
        }
    }

    /// Build the rendering for `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if the totals overflow.
    pub fn project(&self, items: &[LineItem]) -> Result<Rendering, TotalsError> {
        if items.is_empty() {
            return Ok(Rendering::Empty {
                message: self.empty_message.clone(),
            });
        }

        let totals = totals(items)?;

        let rows = items
            .iter()
            .map(|item| RowView {
                name: item.name.clone(),
                price: format_price(item.price, self.currency),
                quantity: item.quantity,
                on_quantity: QuantityHandler::new(item.name.clone(), item.quantity),
                on_remove: RemoveHandler::new(item.name.clone()),
            })
            .collect();

        Ok(Rendering::Listing {
            rows,
            summary: SummaryView {
                total_items: totals.items,
                total_price: format_amount(totals.price),
            },
        })
    }

    /// Load the booking from `store` and present it on `surface`.
    ///
    /// Returns `None` without touching the surface when it lacks any of its regions.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the booking cannot be loaded, the totals overflow,
    /// or the surface rejects the update.
    pub fn render<S, V>(
        &self,
        store: &BookingStore<S>,
        surface: &mut V,
    ) -> Result<Option<Rendering>, RenderError>
    where
        S: Storage,
        V: BookingSurface + ?Sized,
    {
        let items = store.load()?;

        if !surface.has_regions() {
            trace!("booking regions missing, skipping render");
            return Ok(None);
        }

        let rendering = self.project(&items)?;

        match &rendering {
            Rendering::Empty { message } => surface.show_empty(message)?,
            Rendering::Listing { rows, summary } => surface.show_listing(rows, summary)?,
        }

        Ok(Some(rendering))
    }
}
