//! Dividend CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_dividend_list;
use crate::error::FolioResult;
use crate::services::{DividendService, SecurityService};
use crate::storage::Storage;

use super::{entry_date, parse_amount};

/// Dividend subcommands
#[derive(Subcommand)]
pub enum DividendCommands {
    /// Record a dividend received, in the home currency
    Add {
        /// Security code or ID
        security: String,
        /// Amount received
        amount: String,
        /// Payment date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
        /// Comments
        #[arg(short, long, default_value = "")]
        comments: String,
    },
    /// List dividends
    List {
        /// Only this security (code or ID)
        #[arg(short, long)]
        security: Option<String>,
    },
    /// Delete a dividend
    Delete {
        /// Dividend ID (full or short)
        id: String,
    },
}

/// Handle a dividend command
pub fn handle_dividend_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: DividendCommands,
) -> FolioResult<()> {
    let service = DividendService::new(storage);
    let securities = SecurityService::new(storage);

    match cmd {
        DividendCommands::Add {
            security,
            amount,
            date,
            comments,
        } => {
            let security = securities.require(&security)?;
            let date = entry_date(date.as_deref(), settings)?;
            let amount = parse_amount(&amount, "amount")?;

            let dividend = service.record(security.id, date, amount, &comments)?;
            settings.remember_entry_date(date);

            println!(
                "Recorded dividend from {} on {}: {}",
                security.code, dividend.date, dividend.amount
            );
            println!("  ID: {}", dividend.id);
        }

        DividendCommands::List { security } => {
            let filter = security
                .map(|s| securities.require(&s))
                .transpose()?
                .map(|s| s.id);
            let dividends = service.list(filter)?;
            let by_id: HashMap<_, _> = securities
                .list()?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();

            print!("{}", format_dividend_list(&dividends, &by_id));
        }

        DividendCommands::Delete { id } => {
            let dividend = service.find(&id)?;
            service.delete(dividend.id)?;
            println!("Deleted dividend: {} on {}", dividend.amount, dividend.date);
        }
    }

    Ok(())
}
