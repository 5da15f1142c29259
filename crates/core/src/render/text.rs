//! Text surface
//!
//! Writes the booking as a table, for terminals and logs.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use super::{BookingSurface, RowView, SummaryView, SurfaceError};

/// A [`BookingSurface`] that writes each rendering to an [`io::Write`].
#[derive(Debug)]
pub struct TextSurface<W> {
    out: W,
}

impl<W: io::Write> TextSurface<W> {
    /// Create a surface writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the surface, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> BookingSurface for TextSurface<W> {
    fn has_regions(&self) -> bool {
        true
    }

    fn show_empty(&mut self, message: &str) -> Result<(), SurfaceError> {
        writeln!(self.out, "{message}")?;

        Ok(())
    }

    fn show_listing(
        &mut self,
        rows: &[RowView],
        summary: &SummaryView,
    ) -> Result<(), SurfaceError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Price", "Qty"]);

        for row in rows {
            builder.push_record([row.name.clone(), row.price.clone(), row.quantity.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..3), Alignment::right());

        writeln!(self.out, "{table}")?;
        writeln!(self.out, " Items: {}", summary.total_items)?;
        writeln!(self.out, " Total: {}", summary.total_price)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::render::{QuantityHandler, RemoveHandler};

    fn row(name: &str, price: &str, quantity: u32) -> RowView {
        RowView {
            name: name.to_string(),
            price: price.to_string(),
            quantity,
            on_quantity: QuantityHandler::new(name, quantity),
            on_remove: RemoveHandler::new(name),
        }
    }

    #[test]
    fn show_empty_writes_message() -> TestResult {
        let mut surface = TextSurface::new(Vec::new());

        surface.show_empty("No items in your booking.")?;

        assert_eq!(
            String::from_utf8(surface.into_inner())?,
            "No items in your booking.\n"
        );

        Ok(())
    }

    #[test]
    fn show_listing_writes_rows_and_totals() -> TestResult {
        let mut surface = TextSurface::new(Vec::new());
        let rows = [row("Burger", "$9.99", 2), row("Fries", "$2.50", 1)];
        let summary = SummaryView {
            total_items: 3,
            total_price: "22.48".to_string(),
        };

        surface.show_listing(&rows, &summary)?;

        let output = String::from_utf8(surface.into_inner())?;
        assert!(output.contains("Burger"));
        assert!(output.contains("$9.99"));
        assert!(output.contains("Fries"));
        assert!(output.contains("Items: 3"));
        assert!(output.contains("Total: 22.48"));

        Ok(())
    }
}
