//! Record list formatting
//!
//! Tables for the records a user enters. Each row shows the short ID so the
//! record can be passed back to a `delete` command.

use std::collections::HashMap;

use crate::models::{
    CashEntry, Currency, Dividend, ExchangeRate, Price, Security, SecurityId, Transaction,
};

use super::{format_quantity, render_table};

pub fn format_security_list(securities: &[Security]) -> String {
    if securities.is_empty() {
        return "No securities found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = securities
        .iter()
        .map(|s| {
            vec![
                s.code.clone(),
                s.name.clone(),
                s.currency.clone(),
                s.id.to_string(),
            ]
        })
        .collect();

    render_table(&["Code", "Name", "Currency", "ID"], &[], &rows)
}

/// Format transactions; `securities` supplies the code shown for each row
pub fn format_transaction_list(
    transactions: &[Transaction],
    securities: &HashMap<SecurityId, Security>,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            let code = securities
                .get(&t.security_id)
                .map(|s| s.code.clone())
                .unwrap_or_else(|| "?".to_string());
            vec![
                t.date.format("%Y-%m-%d").to_string(),
                code,
                t.type_label().to_string(),
                format_quantity(t.quantity),
                t.amount.to_string(),
                t.fees.to_string(),
                t.id.to_string(),
                t.memo.clone(),
            ]
        })
        .collect();

    render_table(
        &["Date", "Security", "Type", "Quantity", "Amount", "Fees", "ID", "Memo"],
        &[false, false, false, true, true, true, false, false],
        &rows,
    )
}

pub fn format_price_list(security: &Security, prices: &[Price]) -> String {
    if prices.is_empty() {
        return format!("No prices recorded for {}.\n", security.code);
    }

    let rows: Vec<Vec<String>> = prices
        .iter()
        .map(|p| {
            vec![
                p.date.format("%Y-%m-%d").to_string(),
                p.price.to_string(),
                p.id.to_string(),
                p.comments.clone(),
            ]
        })
        .collect();

    let mut output = format!("Prices for {} ({})\n\n", security, security.currency);
    output.push_str(&render_table(
        &["Date", "Price", "ID", "Comments"],
        &[false, true, false, false],
        &rows,
    ));
    output
}

pub fn format_dividend_list(
    dividends: &[Dividend],
    securities: &HashMap<SecurityId, Security>,
) -> String {
    if dividends.is_empty() {
        return "No dividends found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = dividends
        .iter()
        .map(|d| {
            vec![
                d.date.format("%Y-%m-%d").to_string(),
                securities
                    .get(&d.security_id)
                    .map(|s| s.code.clone())
                    .unwrap_or_else(|| "?".to_string()),
                d.amount.to_string(),
                d.id.to_string(),
                d.comments.clone(),
            ]
        })
        .collect();

    render_table(
        &["Date", "Security", "Amount", "ID", "Comments"],
        &[false, false, true, false, false],
        &rows,
    )
}

pub fn format_currency_list(currencies: &[Currency], home_currency: &str) -> String {
    let mut output = format!("Home currency: {}\n\n", home_currency);

    if currencies.is_empty() {
        output.push_str("No foreign currencies defined.\n");
        return output;
    }

    let rows: Vec<Vec<String>> = currencies
        .iter()
        .map(|c| vec![c.code.clone(), c.name.clone(), c.id.to_string()])
        .collect();
    output.push_str(&render_table(&["Code", "Name", "ID"], &[], &rows));
    output
}

pub fn format_rate_list(currency: &Currency, rates: &[ExchangeRate], home_currency: &str) -> String {
    if rates.is_empty() {
        return format!("No exchange rates recorded for {}.\n", currency.code);
    }

    let rows: Vec<Vec<String>> = rates
        .iter()
        .map(|r| {
            vec![
                r.date.format("%Y-%m-%d").to_string(),
                r.rate.normalize().to_string(),
                r.id.to_string(),
            ]
        })
        .collect();

    let mut output = format!("1 {} in {}\n\n", currency.code, home_currency);
    output.push_str(&render_table(&["Date", "Rate", "ID"], &[false, true, false], &rows));
    output
}

pub fn format_cash_list(entries: &[CashEntry]) -> String {
    if entries.is_empty() {
        return "No cash entries found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.date.format("%Y-%m-%d").to_string(),
                e.entry_type().to_string(),
                e.amount.to_string(),
                e.id.to_string(),
                e.memo.clone(),
            ]
        })
        .collect();

    render_table(
        &["Date", "Type", "Amount", "ID", "Memo"],
        &[false, false, true, false, false],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_transaction_list() {
        let security = Security::new("ACME", "Acme Corp", "EUR");
        let txn = Transaction::trade(
            security.id,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            dec!(-2.50),
            Money::from_cents(30000),
            Money::from_cents(150),
        );
        let mut lookup = HashMap::new();
        lookup.insert(security.id, security);

        let text = format_transaction_list(&[txn.clone()], &lookup);
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("Sell"));
        assert!(text.contains("-2.5"));
        assert!(text.contains(&txn.id.to_string()));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_security_list(&[]), "No securities found.\n");
        assert_eq!(format_cash_list(&[]), "No cash entries found.\n");
        assert!(format_currency_list(&[], "EUR").contains("Home currency: EUR"));
    }
}
