//! CLI commands for data export
//!
//! Exports go to a file when one is named, otherwise to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{FolioError, FolioResult};
use crate::export::{csv, json, yaml};
use crate::services::{CashService, PortfolioService, PriceService, SecurityService};
use crate::storage::Storage;

use super::portfolio::PortfolioArgs;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the holdings on a date
    Snapshot {
        /// Output file path (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[command(flatten)]
        portfolio: PortfolioArgs,
    },

    /// Export the cash ledger with running balance
    Ledger {
        /// Output file path (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Export the price history of a security as JSON
    Prices {
        /// Security code or ID
        security: String,

        /// Output file path (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every record for backup
    All {
        /// Output file path (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (json or yaml)
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FolioResult<()> {
    match cmd {
        ExportCommands::Snapshot {
            output,
            format,
            portfolio,
        } => {
            let service = PortfolioService::new(storage, &settings.home_currency);
            let snapshot = service.snapshot(&portfolio.options(settings)?)?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => csv::export_snapshot_csv(&snapshot, &mut writer)?,
                ExportFormat::Json => json::export_snapshot_json(&snapshot, &mut writer, true)?,
                ExportFormat::Yaml => yaml::export_snapshot_yaml(&snapshot, &mut writer)?,
            }
            finish(writer, output.as_ref(), "Snapshot")
        }

        ExportCommands::Ledger { output, format } => {
            let ledger = CashService::new(storage).ledger()?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => csv::export_ledger_csv(&ledger, &mut writer)?,
                ExportFormat::Json => json::export_ledger_json(&ledger, &mut writer, true)?,
                ExportFormat::Yaml => yaml::export_ledger_yaml(&ledger, &mut writer)?,
            }
            finish(writer, output.as_ref(), "Cash ledger")
        }

        ExportCommands::Prices { security, output } => {
            let security = SecurityService::new(storage).require(&security)?;
            let prices = PriceService::new(storage).list(security.id)?;

            let mut writer = open_output(output.as_ref())?;
            json::export_price_history_json(&security, &prices, &mut writer)?;
            finish(writer, output.as_ref(), "Price history")
        }

        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => {
                    return Err(FolioError::Export(
                        "A full export needs a structured format: use json or yaml".into(),
                    ))
                }
                ExportFormat::Json => {
                    json::export_full_json(storage, &settings.home_currency, &mut writer, pretty)?
                }
                ExportFormat::Yaml => {
                    yaml::export_full_yaml(storage, &settings.home_currency, &mut writer)?
                }
            }
            finish(writer, output.as_ref(), "Full database")
        }
    }
}

fn open_output(output: Option<&PathBuf>) -> FolioResult<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path).map_err(|e| {
            FolioError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?),
        None => Box::new(io::stdout()),
    };
    Ok(BufWriter::new(sink))
}

fn finish(
    mut writer: BufWriter<Box<dyn Write>>,
    output: Option<&PathBuf>,
    what: &str,
) -> FolioResult<()> {
    writer
        .flush()
        .map_err(|e| FolioError::Export(e.to_string()))?;

    if let Some(path) = output {
        eprintln!("{} exported to: {}", what, path.display());
    }
    Ok(())
}
