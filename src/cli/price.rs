//! Price CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_price_list;
use crate::error::FolioResult;
use crate::services::{PriceInput, PriceService, SecurityService};
use crate::storage::Storage;

use super::entry_date;

/// Price subcommands
#[derive(Subcommand)]
pub enum PriceCommands {
    /// Record a price in the security's trading currency
    ///
    /// A price ending in '!' is the value of the whole position and is
    /// divided by the units held on the date.
    Add {
        /// Security code or ID
        security: String,
        /// Unit price, or position total with a trailing '!'
        price: String,
        /// Price date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
        /// Comments
        #[arg(short, long, default_value = "")]
        comments: String,
    },
    /// Show the price history of a security
    List {
        /// Security code or ID
        security: String,
    },
    /// Delete a price
    Delete {
        /// Price ID (full or short)
        id: String,
    },
}

/// Handle a price command
pub fn handle_price_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: PriceCommands,
) -> FolioResult<()> {
    let service = PriceService::new(storage);
    let securities = SecurityService::new(storage);

    match cmd {
        PriceCommands::Add {
            security,
            price,
            date,
            comments,
        } => {
            let security = securities.require(&security)?;
            let date = entry_date(date.as_deref(), settings)?;
            let input = PriceInput::parse(&price)?;

            let recorded = service.record(security.id, date, input, &comments)?;
            settings.remember_entry_date(date);

            println!(
                "Recorded price of {} on {}: {} {}",
                security.code, recorded.date, recorded.price, security.currency
            );
            println!("  ID: {}", recorded.id);
        }

        PriceCommands::List { security } => {
            let security = securities.require(&security)?;
            let prices = service.list(security.id)?;
            print!("{}", format_price_list(&security, &prices));
        }

        PriceCommands::Delete { id } => {
            let price = service.find(&id)?;
            service.delete(price.id)?;
            println!("Deleted price: {} on {}", price.price, price.date);
        }
    }

    Ok(())
}
