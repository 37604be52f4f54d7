//! Transaction CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_quantity, format_transaction_list};
use crate::error::FolioResult;
use crate::models::Money;
use crate::services::{CreateTransactionInput, SecurityService, TransactionService};
use crate::storage::Storage;

use super::{entry_date, parse_amount, parse_quantity};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a purchase (positive quantity) or sale (negative quantity)
    Add {
        /// Security code or ID
        security: String,
        /// Units bought, or sold when negative (e.g. -4)
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        /// Total paid or received, fees included, in the home currency
        amount: String,
        /// Commission or fees paid
        #[arg(short, long, default_value = "0")]
        fees: String,
        /// Transaction date (YYYY-MM-DD, default the last date used)
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List transactions
    List {
        /// Only this security (code or ID)
        #[arg(short, long)]
        security: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: TransactionCommands,
) -> FolioResult<()> {
    let service = TransactionService::new(storage);
    let securities = SecurityService::new(storage);

    match cmd {
        TransactionCommands::Add {
            security,
            quantity,
            amount,
            fees,
            date,
            memo,
        } => {
            let security = securities.require(&security)?;
            let date = entry_date(date.as_deref(), settings)?;
            let quantity = parse_quantity(&quantity)?;
            let amount = parse_amount(&amount, "amount")?;
            let fees = if fees.trim().is_empty() {
                Money::zero()
            } else {
                parse_amount(&fees, "fees")?
            };

            let txn = service.create(CreateTransactionInput {
                security_id: security.id,
                date,
                quantity,
                amount,
                fees,
                memo,
            })?;
            settings.remember_entry_date(date);

            println!(
                "Recorded {}: {} {} of {} for {}",
                txn.date,
                txn.type_label(),
                format_quantity(txn.quantity.abs()),
                security.code,
                txn.amount
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List { security } => {
            let filter = security
                .map(|s| securities.require(&s))
                .transpose()?
                .map(|s| s.id);
            let transactions = service.list(filter)?;
            let by_id: HashMap<_, _> = securities
                .list()?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();

            print!("{}", format_transaction_list(&transactions, &by_id));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.find(&id)?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction: {}", deleted);
        }
    }

    Ok(())
}
