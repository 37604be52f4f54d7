//! Portfolio snapshot command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_snapshot;
use crate::error::FolioResult;
use crate::services::PortfolioService;
use crate::storage::Storage;
use crate::valuation::{FailurePolicy, LookupMode, SnapshotOptions};

use super::as_of_date;

/// Options shared by the portfolio view and snapshot exports
#[derive(Args, Debug, Clone, Default)]
pub struct PortfolioArgs {
    /// Valuation date (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Include securities no longer held
    #[arg(short, long)]
    pub all: bool,

    /// Interpolate prices and rates between recorded dates
    #[arg(long)]
    pub interpolate: bool,

    /// Fail if any security cannot be valued
    #[arg(long)]
    pub strict: bool,
}

impl PortfolioArgs {
    /// Snapshot options from these flags, falling back to `settings`
    pub fn options(&self, settings: &Settings) -> FolioResult<SnapshotOptions> {
        let as_of = as_of_date(self.date.as_deref())?;
        let lookup = if self.interpolate {
            LookupMode::Interpolated
        } else {
            settings.price_lookup
        };
        let policy = if self.strict {
            FailurePolicy::Abort
        } else {
            settings.failure_policy
        };

        Ok(SnapshotOptions::new(as_of)
            .include_closed(self.all)
            .price_lookup(lookup)
            .failure_policy(policy))
    }
}

/// Show the holdings and their value on a date
pub fn handle_portfolio_command(
    storage: &Storage,
    settings: &Settings,
    args: PortfolioArgs,
) -> FolioResult<()> {
    let service = PortfolioService::new(storage, &settings.home_currency);
    let snapshot = service.snapshot(&args.options(settings)?)?;

    print!("{}", format_snapshot(&snapshot));
    Ok(())
}
