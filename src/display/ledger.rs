//! Cash ledger display formatting

use chrono::NaiveDate;

use crate::valuation::CashLedger;

use super::render_table;

/// Format the ledger with a running balance, optionally only up to `until`
pub fn format_ledger(ledger: &CashLedger, until: Option<NaiveDate>) -> String {
    let rows: Vec<Vec<String>> = ledger
        .running_balances()
        .into_iter()
        .filter(|(entry, _)| until.map_or(true, |date| entry.date <= date))
        .map(|(entry, balance)| {
            vec![
                entry.date.format("%Y-%m-%d").to_string(),
                entry.category.to_string(),
                entry.amount.to_string(),
                balance.to_string(),
                entry.memo.clone(),
            ]
        })
        .collect();

    if rows.is_empty() {
        return "No cash movements found.\n".to_string();
    }

    let balance = match until {
        Some(date) => ledger.balance_as_of(date),
        None => ledger.total(),
    };

    let mut output = render_table(
        &["Date", "Type", "Amount", "Balance", "Memo"],
        &[false, false, true, true, false],
        &rows,
    );
    output.push_str(&format!("\nCash balance: {}\n", balance));
    output
}
