//! Booking prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    config::{BookingConfig, ConfigError, Messages, SurfaceConfig},
    items::{LineItem, PriceError, parse_price},
    page::{Action, BookingPage, Notifier, PageError},
    pricing::{Totals, TotalsError, format_amount, totals},
    render::{
        BookingSurface, QuantityHandler, RemoveHandler, RenderError, Renderer, Rendering, RowView,
        SummaryView, SurfaceError, text::TextSurface,
    },
    store::{
        BookingStore, DEFAULT_STORAGE_KEY, FileStorage, MemoryStorage, Storage, StorageError,
        StoreError,
    },
};
