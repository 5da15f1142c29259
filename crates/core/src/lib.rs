//! Booking
//!
//! A menu booking cart: line items persisted in a string key-value store, rendered
//! with editable quantities and running totals, and cleared on submission.

pub mod cart;
pub mod config;
pub mod items;
pub mod page;
pub mod prelude;
pub mod pricing;
pub mod render;
pub mod store;
