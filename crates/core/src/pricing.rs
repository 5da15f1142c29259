//! Pricing

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while calculating booking totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// A line total or the running total does not fit in a decimal.
    #[error("total price overflowed at item {0:?}")]
    Overflow(String),
}

/// Running totals for a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of all quantities.
    pub items: u64,

    /// Sum of unit price times quantity.
    pub price: Decimal,
}

/// Calculates the total quantity and total price of a list of items
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if the price arithmetic overflows.
pub fn totals(items: &[LineItem]) -> Result<Totals, TotalsError> {
    items.iter().try_fold(Totals::default(), |acc, item| {
        let price = item
            .line_total()
            .and_then(|line_total| acc.price.checked_add(line_total))
            .ok_or_else(|| TotalsError::Overflow(item.name.clone()))?;

        Ok(Totals {
            items: acc.items.saturating_add(u64::from(item.quantity)),
            price,
        })
    })
}

/// Format an amount with exactly two decimal places, rounding halves away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{rounded:.2}")
}

/// Format an amount with the currency symbol in front, e.g. `$9.99`.
pub fn format_price(amount: Decimal, currency: &Currency) -> String {
    format!("{}{}", currency.symbol, format_amount(amount))
}

/// Look up a supported currency by ISO code.
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Some(iso::GBP),
        "USD" => Some(iso::USD),
        "EUR" => Some(iso::EUR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(name: &str, price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn totals_of_empty_list_are_zero() -> TestResult {
        assert_eq!(totals(&[])?, Totals::default());

        Ok(())
    }

    #[test]
    fn totals_sum_quantities_and_line_prices() -> TestResult {
        let items = [
            item("Steak", Decimal::new(500, 2), 2),
            item("Salad", Decimal::new(350, 2), 1),
        ];

        let totals = totals(&items)?;

        assert_eq!(totals.items, 3);
        assert_eq!(totals.price, Decimal::new(1350, 2));
        assert_eq!(format_amount(totals.price), "13.50");

        Ok(())
    }

    #[test]
    fn totals_report_overflow() {
        let items = [item("Yacht", Decimal::MAX, 2)];

        assert_eq!(
            totals(&items),
            Err(TotalsError::Overflow("Yacht".to_string()))
        );
    }

    #[test]
    fn format_amount_pads_and_rounds() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(225, 1)), "22.50");
        assert_eq!(format_amount(Decimal::new(2248, 2)), "22.48");
        assert_eq!(format_amount(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(1004, 3)), "1.00");
    }

    #[test]
    fn format_price_prefixes_currency_symbol() {
        assert_eq!(format_price(Decimal::new(999, 2), iso::USD), "$9.99");
        assert_eq!(format_price(Decimal::new(25, 1), iso::GBP), "£2.50");
    }

    #[test]
    fn find_currency_matches_supported_codes() {
        assert_eq!(find_currency("usd"), Some(iso::USD));
        assert_eq!(find_currency("GBP"), Some(iso::GBP));
        assert_eq!(find_currency("JPY"), None);
    }
}
