//! Portfolio display formatting

use crate::valuation::Snapshot;

use super::{format_percent, format_quantity, render_table};

/// Format a snapshot as a holdings table with a total row
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut output = format!(
        "Portfolio as of {} ({})\n\n",
        snapshot.as_of.format("%Y-%m-%d"),
        snapshot.home_currency
    );

    if snapshot.holdings.is_empty() {
        output.push_str("No holdings.\n");
    } else {
        let mut rows: Vec<Vec<String>> = snapshot
            .holdings
            .iter()
            .map(|h| {
                vec![
                    h.security.code.clone(),
                    h.security.name.clone(),
                    format_quantity(h.quantity),
                    h.average_unit_cost
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    h.current_price.to_string(),
                    h.market_value.to_string(),
                    h.total_dividends.to_string(),
                    h.gain.to_string(),
                    format_percent(h.return_pct),
                ]
            })
            .collect();

        rows.push(vec![
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            snapshot.total_market_value().to_string(),
            snapshot.total_dividends().to_string(),
            snapshot.total_gain().to_string(),
            format_percent(snapshot.total_return_pct()),
        ]);

        output.push_str(&render_table(
            &[
                "Code", "Name", "Quantity", "Avg Cost", "Price", "Value", "Dividends", "Gain",
                "Return",
            ],
            &[false, false, true, true, true, true, true, true, true],
            &rows,
        ));
    }

    if !snapshot.failures.is_empty() {
        output.push_str("\nNot valued:\n");
        for failure in &snapshot.failures {
            output.push_str(&format!(
                "  {}: {}\n",
                failure.security.code, failure.error
            ));
        }
    }

    output
}
