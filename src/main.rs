use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use folio::cli::{
    handle_cash_command, handle_currency_command, handle_dividend_command, handle_export_command,
    handle_portfolio_command, handle_price_command, handle_security_command, handle_split_command,
    handle_transaction_command, CashCommands, CurrencyCommands, DividendCommands, ExportCommands,
    PortfolioArgs, PriceCommands, SecurityCommands, SplitArgs, TransactionCommands,
};
use folio::config::{paths::FolioPaths, settings::Settings};
use folio::logging::init_logging;
use folio::storage::{initialize_storage, Storage};
use folio::FolioResult;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Terminal-based investment portfolio tracker",
    long_about = "folio tracks purchases, sales, prices, dividends and cash for a \
                  personal investment portfolio, and values it on any date in a \
                  single home currency using average-cost accounting."
)]
struct Cli {
    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Home (reporting) currency
        #[arg(short, long, default_value = "EUR")]
        currency: String,
    },

    /// Show current configuration and paths
    Config,

    /// Security management commands
    #[command(subcommand, alias = "sec")]
    Security(SecurityCommands),

    /// Purchases and sales
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Security prices
    #[command(subcommand)]
    Price(PriceCommands),

    /// Dividends received
    #[command(subcommand)]
    Dividend(DividendCommands),

    /// Foreign currencies and exchange rates
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Deposits, withdrawals and the cash ledger
    #[command(subcommand)]
    Cash(CashCommands),

    /// Show holdings and their value on a date
    #[command(alias = "pf")]
    Portfolio(PortfolioArgs),

    /// Record a stock split
    Split(SplitArgs),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FolioPaths::new()?;

    match cli.command {
        Some(Commands::Init { currency }) => {
            println!("Initializing folio at: {}", paths.base_dir().display());
            let settings = initialize_storage(&paths, &currency)?;
            println!("Initialization complete!");
            println!("  Home currency: {}", settings.home_currency);
            println!();
            println!("Run 'folio security add <CODE> <NAME>' to add your first security.");
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("folio Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Initialized:    {}", if paths.is_initialized() { "Yes" } else { "No" });
            println!();
            println!("Settings:");
            println!("  Home currency:   {}", settings.home_currency);
            println!("  Price lookup:    {}", settings.price_lookup);
            println!("  Failure policy:  {}", settings.failure_policy);
            match settings.last_entry_date {
                Some(date) => println!("  Last entry date: {}", date),
                None => println!("  Last entry date: (none)"),
            }
        }
        Some(Commands::Security(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_security_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Txn(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_transaction_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Price(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_price_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Dividend(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_dividend_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Currency(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_currency_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Cash(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_cash_command(storage, settings, cmd)
            })?;
        }
        Some(Commands::Portfolio(args)) => {
            with_storage(&paths, |storage, settings| {
                handle_portfolio_command(storage, settings, args)
            })?;
        }
        Some(Commands::Split(args)) => {
            with_storage(&paths, |storage, settings| {
                handle_split_command(storage, settings, args)
            })?;
        }
        Some(Commands::Export(cmd)) => {
            with_storage(&paths, |storage, settings| {
                handle_export_command(storage, settings, cmd)
            })?;
        }
        None => {
            println!("folio - Terminal-based investment portfolio tracker");
            println!();
            println!("Run 'folio --help' for usage information.");
            println!("Run 'folio init' to set up a new portfolio.");
        }
    }

    Ok(())
}

/// Load settings and storage, run `f`, and persist a changed entry date
fn with_storage<F>(paths: &FolioPaths, f: F) -> Result<()>
where
    F: FnOnce(&Storage, &mut Settings) -> FolioResult<()>,
{
    if !paths.is_initialized() {
        bail!(
            "No portfolio found at {}. Run 'folio init' first.",
            paths.base_dir().display()
        );
    }

    let mut settings = Settings::load_or_create(paths)?;
    let last_entry_date = settings.last_entry_date;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    f(&storage, &mut settings)?;

    if settings.last_entry_date != last_entry_date {
        settings.save(paths)?;
    }
    Ok(())
}
