//! Display formatting for terminal output
//!
//! Plain-text tables for holdings, the cash ledger and stored records.
//! Column widths are computed from the content.

pub mod ledger;
pub mod portfolio;
pub mod records;

pub use ledger::format_ledger;
pub use portfolio::format_snapshot;
pub use records::{
    format_cash_list, format_currency_list, format_dividend_list, format_price_list,
    format_rate_list, format_security_list, format_transaction_list,
};

use rust_decimal::{Decimal, RoundingStrategy};

/// A quantity without trailing zeros
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// A percentage to two places, or a dash when undefined
pub(crate) fn format_percent(pct: Option<Decimal>) -> String {
    match pct {
        Some(p) => format!(
            "{:.2}%",
            p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => "-".to_string(),
    }
}

/// Render rows as left/right aligned columns with a dashed separator under the header
pub(crate) fn render_table(headers: &[&str], right_aligned: &[bool], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut output = render_row(&header, &widths, right_aligned);
    output.push_str(&render_row(&separator, &widths, right_aligned));
    for row in rows {
        output.push_str(&render_row(row, &widths, right_aligned));
    }
    output
}

fn render_row(cells: &[String], widths: &[usize], right_aligned: &[bool]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if right_aligned.get(i).copied().unwrap_or(false) {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}
