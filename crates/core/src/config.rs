//! Configuration
//!
//! Every field has a default, so an empty YAML document is a valid configuration
//! matching the stock booking page.

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{pricing::find_currency, store::DEFAULT_STORAGE_KEY};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Booking widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    /// Storage key holding the booking.
    pub storage_key: String,

    /// ISO code of the currency prices are shown in.
    pub currency: String,

    /// Log filter directive, e.g. `info` or `booking=debug`.
    pub log_level: String,

    /// User-facing messages.
    pub messages: Messages,

    /// Page element names the widget binds to.
    pub surface: SurfaceConfig,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: "USD".to_string(),
            log_level: "info".to_string(),
            messages: Messages::default(),
            surface: SurfaceConfig::default(),
        }
    }
}

impl BookingConfig {
    /// Parse a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is not valid configuration and
    /// [`ConfigError::UnknownCurrency`] if the currency code is not supported.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes as null, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_norway::from_str(yaml)?;

        config.currency()?;

        Ok(config)
    }

    /// The configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        find_currency(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    /// Shown in place of the listing when the booking is empty.
    pub empty: String,

    /// Confirmation after adding an item; `{name}` is replaced by the item name.
    pub added: String,

    /// Confirmation after submitting the booking.
    pub submitted: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty: "No items in your booking.".to_string(),
            added: "{name} added to booking.".to_string(),
            submitted: "Thank you for your booking! Your order has been submitted.".to_string(),
        }
    }
}

impl Messages {
    /// The add confirmation for `name`.
    pub fn added_message(&self, name: &str) -> String {
        self.added.replace("{name}", name)
    }
}

/// Names of the page elements the widget reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Id of the element rows are rendered into.
    pub items_id: String,

    /// Id of the summary region, hidden while the booking is empty.
    pub summary_id: String,

    /// Id of the element showing the total quantity.
    pub total_items_id: String,

    /// Id of the element showing the total price.
    pub total_price_id: String,

    /// Id of the optional submit button.
    pub submit_id: String,

    /// Class of the catalog "add" buttons.
    pub add_trigger_class: String,

    /// Attribute on an add button holding the item name.
    pub item_attribute: String,

    /// Attribute on an add button holding the item price.
    pub price_attribute: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            items_id: "booking-items".to_string(),
            summary_id: "booking-summary".to_string(),
            total_items_id: "total-items".to_string(),
            total_price_id: "total-price".to_string(),
            submit_id: "submit-booking".to_string(),
            add_trigger_class: "add-to-booking".to_string(),
            item_attribute: "data-item".to_string(),
            price_attribute: "data-price".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_document_is_default() -> TestResult {
        assert_eq!(BookingConfig::from_yaml("")?, BookingConfig::default());

        Ok(())
    }

    #[test]
    fn partial_document_keeps_other_defaults() -> TestResult {
        let config = BookingConfig::from_yaml(
            "currency: GBP\nmessages:\n  empty: Nothing booked yet.\n",
        )?;

        assert_eq!(config.currency()?, iso::GBP);
        assert_eq!(config.messages.empty, "Nothing booked yet.");
        assert_eq!(config.messages.submitted, Messages::default().submitted);
        assert_eq!(config.storage_key, "bookingItems");
        assert_eq!(config.surface.items_id, "booking-items");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = BookingConfig::from_yaml("currency: XYZ\n");

        assert!(matches!(result, Err(ConfigError::UnknownCurrency(code)) if code == "XYZ"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = BookingConfig::from_yaml("colour: blue\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn added_message_substitutes_name() {
        let messages = Messages::default();

        assert_eq!(messages.added_message("Burger"), "Burger added to booking.");
    }
}
