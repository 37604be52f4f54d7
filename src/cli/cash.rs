//! Cash CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_cash_list, format_ledger};
use crate::error::FolioResult;
use crate::models::CashEntryType;
use crate::services::CashService;
use crate::storage::Storage;

use super::{as_of_date, entry_date, parse_amount};

/// Cash subcommands
#[derive(Subcommand)]
pub enum CashCommands {
    /// Record money paid into the account
    Deposit {
        /// Amount deposited
        amount: String,
        /// Date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long, default_value = "")]
        memo: String,
    },
    /// Record money taken out of the account
    Withdraw {
        /// Amount withdrawn
        amount: String,
        /// Date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long, default_value = "")]
        memo: String,
    },
    /// List manual deposits and withdrawals
    List,
    /// Delete a deposit or withdrawal
    Delete {
        /// Cash entry ID (full or short)
        id: String,
    },
    /// Show every cash movement with a running balance
    Ledger {
        /// Stop at this date (YYYY-MM-DD)
        #[arg(short, long)]
        until: Option<String>,
    },
    /// Show the cash balance on a date
    Balance {
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a cash command
pub fn handle_cash_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: CashCommands,
) -> FolioResult<()> {
    let service = CashService::new(storage);

    match cmd {
        CashCommands::Deposit { amount, date, memo } => {
            record(&service, settings, CashEntryType::Deposit, &amount, date, &memo)?;
        }

        CashCommands::Withdraw { amount, date, memo } => {
            record(&service, settings, CashEntryType::Withdrawal, &amount, date, &memo)?;
        }

        CashCommands::List => {
            print!("{}", format_cash_list(&service.list()?));
        }

        CashCommands::Delete { id } => {
            let entry = service.find(&id)?;
            service.delete(entry.id)?;
            println!("Deleted {}: {} on {}", entry.entry_type(), entry.amount, entry.date);
        }

        CashCommands::Ledger { until } => {
            let until = until.as_deref().map(crate::models::parse_date).transpose()?;
            print!("{}", format_ledger(&service.ledger()?, until));
        }

        CashCommands::Balance { date } => {
            let date = as_of_date(date.as_deref())?;
            let balance = service.balance_as_of(date)?;
            println!(
                "Cash balance on {}: {} {}",
                date, balance, settings.home_currency
            );
        }
    }

    Ok(())
}

fn record(
    service: &CashService,
    settings: &mut Settings,
    entry_type: CashEntryType,
    amount: &str,
    date: Option<String>,
    memo: &str,
) -> FolioResult<()> {
    let date = entry_date(date.as_deref(), settings)?;
    let amount = parse_amount(amount, "amount")?;

    let entry = service.record(date, entry_type, amount, memo)?;
    settings.remember_entry_date(date);

    println!("Recorded {} on {}: {}", entry_type, entry.date, entry.amount);
    println!("  ID: {}", entry.id);
    Ok(())
}
