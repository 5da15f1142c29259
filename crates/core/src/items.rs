//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a price from catalog input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),

    /// The price is below zero.
    #[error("price must not be negative, got {0}")]
    Negative(Decimal),

    /// The price would not read back unchanged from storage.
    #[error("price {0} cannot be stored exactly")]
    Unrepresentable(Decimal),
}

/// A single line in the booking: an item name, its unit price and the quantity selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name, unique within a cart.
    pub name: String,

    /// Unit price.
    #[serde(with = "json_price")]
    pub price: Decimal,

    /// Quantity selected, at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a new line item with a quantity of one.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Parse a catalog price string (e.g. `"9.99"`) into a non-negative decimal.
///
/// # Errors
///
/// Returns [`PriceError::Invalid`] when the trimmed text is not a decimal number and
/// [`PriceError::Negative`] when it is below zero. Prices that would not read back
/// unchanged from a stored booking are rejected with [`PriceError::Unrepresentable`].
pub fn parse_price(s: &str) -> Result<Decimal, PriceError> {
    let price = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::Invalid(s.to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(PriceError::Negative(price));
    }

    if json_price::round_trip(price) != Some(price) {
        return Err(PriceError::Unrepresentable(price));
    }

    Ok(price)
}

/// Stores prices as plain JSON numbers (`9.99`), the layout browsers already hold.
mod json_price {
    use rust_decimal::{Decimal, prelude::ToPrimitive};
    use serde::{Deserialize, Deserializer, Serializer, de, ser};

    /// The price as it reads back after being stored, if it survives the trip at all.
    pub(super) fn round_trip(price: Decimal) -> Option<Decimal> {
        from_f64(price.to_f64()?).ok()
    }

    // f64 display is the shortest round-trip form, so 9.99 reads back as exactly 9.99
    fn from_f64(value: f64) -> Result<Decimal, rust_decimal::Error> {
        value.to_string().parse::<Decimal>()
    }

    pub(super) fn serialize<S: Serializer>(
        price: &Decimal,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let Some(value) = price.to_f64() else {
            return Err(<S::Error as ser::Error>::custom(format!(
                "price {price} is not representable"
            )));
        };

        serializer.serialize_f64(value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Decimal, D::Error> {
        let value = f64::deserialize(deserializer)?;

        from_f64(value)
            .map_err(|err| <D::Error as de::Error>::custom(format!("invalid price {value}: {err}")))
    }
}
