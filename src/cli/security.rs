//! Security CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_quantity, format_security_list};
use crate::error::FolioResult;
use crate::services::{PortfolioService, SecurityService};
use crate::storage::Storage;

use super::as_of_date;

/// Security subcommands
#[derive(Subcommand)]
pub enum SecurityCommands {
    /// Add a security
    Add {
        /// Ticker or short code
        code: String,
        /// Display name
        name: String,
        /// Trading currency (defaults to the home currency)
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// List all securities
    List,
    /// Show a security with its holding on a date
    Show {
        /// Security code or ID
        security: String,
        /// Valuation date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Rename a security or change its currency
    Edit {
        /// Security code or ID
        security: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New trading currency
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Delete a security with no recorded activity
    Delete {
        /// Security code or ID
        security: String,
    },
}

/// Handle a security command
pub fn handle_security_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SecurityCommands,
) -> FolioResult<()> {
    let service = SecurityService::new(storage);

    match cmd {
        SecurityCommands::Add {
            code,
            name,
            currency,
        } => {
            let currency = currency.unwrap_or_else(|| settings.home_currency.clone());
            let security = service.create(&code, &name, &currency)?;

            println!("Created security: {}", security);
            println!("  Currency: {}", security.currency);
            println!("  ID: {}", security.id);
        }

        SecurityCommands::List => {
            print!("{}", format_security_list(&service.list()?));
        }

        SecurityCommands::Show { security, date } => {
            let security = service.require(&security)?;
            let as_of = as_of_date(date.as_deref())?;
            let portfolio = PortfolioService::new(storage, &settings.home_currency);

            println!("{}", security);
            println!("  Currency: {}", security.currency);
            println!("  ID: {}", security.id);
            println!(
                "  Units held on {}: {}",
                as_of,
                format_quantity(portfolio.units_held(security.id, as_of)?)
            );
            match portfolio.current_value(security.id, as_of, settings.price_lookup) {
                Ok(value) => println!("  Unit value: {} {}", value, settings.home_currency),
                Err(e) => println!("  Unit value: unavailable ({})", e),
            }
        }

        SecurityCommands::Edit {
            security,
            name,
            currency,
        } => {
            let found = service.require(&security)?;
            if name.is_none() && currency.is_none() {
                println!("Nothing to change. Use --name or --currency.");
                return Ok(());
            }

            let updated = service.update(found.id, name.as_deref(), currency.as_deref())?;
            println!("Updated security: {}", updated);
            println!("  Currency: {}", updated.currency);
        }

        SecurityCommands::Delete { security } => {
            let found = service.require(&security)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted security: {}", deleted);
        }
    }

    Ok(())
}
