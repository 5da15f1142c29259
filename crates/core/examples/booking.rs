//! File-backed Booking Example
//!
//! Drives a booking stored in a directory, printing the booking after each change.
//!
//! Use `-d` to choose the storage directory
//! Use `-c` to load a YAML configuration file

use std::{fs, io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use booking::prelude::*;

/// Arguments for the booking example
#[derive(Debug, Parser)]
struct Args {
    /// Directory the booking is stored in
    #[clap(short, long, default_value = "target/booking")]
    dir: PathBuf,

    /// Optional YAML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add one unit of an item
    Add {
        /// Item name
        name: String,

        /// Unit price, used when the item is new
        price: String,
    },

    /// Set an item's quantity
    Set {
        /// Item name
        name: String,

        /// New quantity, values below one are stored as one
        #[clap(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Remove an item
    Remove {
        /// Item name
        name: String,
    },

    /// Submit and clear the booking
    Submit,

    /// Show the booking
    Show,
}

#[derive(Debug)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    #[expect(clippy::print_stderr, reason = "Example program output to user")]
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// File-backed Booking Example
pub fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BookingConfig::from_yaml(&fs::read_to_string(path)?)?,
        None => BookingConfig::default(),
    };

    let mut page = BookingPage::new(
        &config,
        FileStorage::new(args.dir),
        TextSurface::new(io::stdout()),
        StderrNotifier,
    )?;

    match args.command {
        Command::Add { name, price } => {
            page.dispatch(Action::Add { name, price })?;
            page.render()?;
        }
        Command::Set { name, quantity } => {
            page.cart().update_quantity(&name, quantity)?;
            page.render()?;
        }
        Command::Remove { name } => page.dispatch(Action::Remove { name })?,
        Command::Submit => page.dispatch(Action::Submit)?,
        Command::Show => {
            page.render()?;
        }
    }

    Ok(())
}
