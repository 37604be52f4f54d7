//! Stock split command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_quantity;
use crate::error::FolioResult;
use crate::services::{SecurityService, SplitService};
use crate::storage::Storage;

use super::{entry_date, parse_quantity};

/// Arguments for a split
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Security code or ID
    pub security: String,

    /// Units held after the split
    pub new_quantity: String,

    /// Split date (YYYY-MM-DD, default the last date used)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Show the adjustment without recording it
    #[arg(long)]
    pub dry_run: bool,
}

/// Record a split: a quantity adjustment plus a rescaled price
pub fn handle_split_command(
    storage: &Storage,
    settings: &mut Settings,
    args: SplitArgs,
) -> FolioResult<()> {
    let security = SecurityService::new(storage).require(&args.security)?;
    let date = entry_date(args.date.as_deref(), settings)?;
    let new_quantity = parse_quantity(&args.new_quantity)?;
    let service = SplitService::new(storage);

    let plan = service.preview(security.id, date, new_quantity)?;
    println!("Split of {} on {}", security, date);
    println!(
        "  Units: {} -> {}",
        format_quantity(plan.current_quantity),
        format_quantity(plan.new_quantity)
    );
    println!(
        "  Price: {} -> {} {}",
        plan.current_price, plan.new_price, security.currency
    );

    if args.dry_run {
        println!("Dry run: nothing recorded.");
        return Ok(());
    }

    let (transaction, price) = service.apply_split(security.id, date, new_quantity)?;
    settings.remember_entry_date(date);

    println!("Recorded split adjustment {} and price {}", transaction.id, price.id);
    Ok(())
}
