//! Currency and exchange rate CLI commands

use std::str::FromStr;

use clap::Subcommand;
use rust_decimal::Decimal;

use crate::config::settings::Settings;
use crate::display::{format_currency_list, format_rate_list};
use crate::error::{FolioError, FolioResult};
use crate::services::CurrencyService;
use crate::storage::Storage;

use super::entry_date;

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// Register a foreign currency
    Add {
        /// Three-letter code (e.g. USD)
        code: String,
        /// Display name
        name: String,
    },
    /// List registered currencies
    List,
    /// Delete a currency and its rates
    Delete {
        /// Currency code
        code: String,
    },
    /// Record the value of one unit in the home currency
    Rate {
        /// Currency code
        code: String,
        /// Home-currency value of one unit (e.g. 0.92)
        rate: String,
        /// Rate date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the rate history of a currency
    Rates {
        /// Currency code
        code: String,
    },
    /// Delete one exchange rate
    DeleteRate {
        /// Rate ID (full or short)
        id: String,
    },
}

/// Handle a currency command
pub fn handle_currency_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: CurrencyCommands,
) -> FolioResult<()> {
    let service = CurrencyService::new(storage);

    match cmd {
        CurrencyCommands::Add { code, name } => {
            if code.trim().eq_ignore_ascii_case(&settings.home_currency) {
                return Err(FolioError::Validation(format!(
                    "{} is the home currency and needs no rates",
                    settings.home_currency
                )));
            }

            let currency = service.create(&code, &name)?;
            println!("Registered currency: {} ({})", currency.code, currency.name);
        }

        CurrencyCommands::List => {
            print!(
                "{}",
                format_currency_list(&service.list()?, &settings.home_currency)
            );
        }

        CurrencyCommands::Delete { code } => {
            let currency = service.require(&code)?;
            let deleted = service.delete(currency.id)?;
            println!("Deleted currency: {}", deleted.code);
        }

        CurrencyCommands::Rate { code, rate, date } => {
            let currency = service.require(&code)?;
            let date = entry_date(date.as_deref(), settings)?;
            let rate = Decimal::from_str(rate.trim())
                .map_err(|_| FolioError::Validation(format!("Invalid rate: '{}'", rate)))?;

            let recorded = service.add_rate(currency.id, date, rate)?;
            settings.remember_entry_date(date);

            println!(
                "Recorded rate on {}: 1 {} = {} {}",
                recorded.date,
                currency.code,
                recorded.rate.normalize(),
                settings.home_currency
            );
        }

        CurrencyCommands::Rates { code } => {
            let currency = service.require(&code)?;
            let rates = service.rates(currency.id)?;
            print!(
                "{}",
                format_rate_list(&currency, &rates, &settings.home_currency)
            );
        }

        CurrencyCommands::DeleteRate { id } => {
            let rate = service.delete_rate(&id)?;
            println!("Deleted rate of {} on {}", rate.rate.normalize(), rate.date);
        }
    }

    Ok(())
}
