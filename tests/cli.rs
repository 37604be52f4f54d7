//! End-to-end tests of the `folio` binary against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn folio(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_CLI_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    folio(dir).args(args).assert().success();
}

/// An initialized portfolio holding 10 ACME bought for 1000, priced at 110
fn portfolio_with_acme() -> TempDir {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init", "--currency", "EUR"]);
    run(&dir, &["security", "add", "ACME", "Acme Corp"]);
    run(&dir, &["cash", "deposit", "2000", "--date", "2024-01-01", "--memo", "Opening"]);
    run(&dir, &["txn", "add", "ACME", "10", "1000", "--date", "2024-01-10"]);
    run(&dir, &["price", "add", "ACME", "110", "--date", "2024-02-01"]);
    dir
}

#[test]
fn test_commands_require_init() {
    let dir = TempDir::new().unwrap();

    folio(&dir)
        .args(["security", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folio init"));
}

#[test]
fn test_init_and_config() {
    let dir = TempDir::new().unwrap();

    folio(&dir)
        .args(["init", "--currency", "usd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home currency: USD"));

    folio(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Home currency:   USD"));

    folio(&dir)
        .args(["init", "--currency", "EURO"])
        .assert()
        .failure();
}

#[test]
fn test_portfolio_values_holdings() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["portfolio", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio as of 2024-03-01 (EUR)"))
        .stdout(predicate::str::contains("ACME"))
        .stdout(predicate::str::contains("1100.00"))
        .stdout(predicate::str::contains("10.00%"));
}

#[test]
fn test_portfolio_before_first_purchase_is_empty() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["portfolio", "--date", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No holdings."));
}

#[test]
fn test_overselling_is_rejected() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["txn", "add", "ACME", "-20", "500", "--date", "2024-02-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Negative holdings"));

    folio(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sell").not());
}

#[test]
fn test_cash_balance_and_ledger() {
    let dir = portfolio_with_acme();
    run(&dir, &["txn", "add", "ACME", "-4", "480", "--date", "2024-02-15"]);

    folio(&dir)
        .args(["cash", "balance", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash balance on 2024-03-01: 1480.00 EUR"));

    folio(&dir)
        .args(["cash", "ledger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sell -4 Acme Corp"))
        .stdout(predicate::str::contains("Cash balance: 1480.00"));
}

#[test]
fn test_entry_date_defaults_to_last_used() {
    let dir = portfolio_with_acme();
    run(&dir, &["dividend", "add", "ACME", "12.50"]);

    folio(&dir)
        .args(["dividend", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-01"))
        .stdout(predicate::str::contains("12.50"));
}

#[test]
fn test_split_keeps_market_value() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["split", "ACME", "20", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Units: 10 -> 20"))
        .stdout(predicate::str::contains("Price: 110.00 -> 55.00 EUR"));

    folio(&dir)
        .args(["portfolio", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("55.00"))
        .stdout(predicate::str::contains("1100.00"));

    folio(&dir)
        .args(["split", "ACME", "20", "--date", "2024-03-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Split has no effect"));
}

#[test]
fn test_unpriced_security_is_skipped_unless_strict() {
    let dir = portfolio_with_acme();
    run(&dir, &["security", "add", "NOPR", "No Price Inc"]);
    run(&dir, &["txn", "add", "NOPR", "5", "50", "--date", "2024-01-20"]);

    folio(&dir)
        .args(["portfolio", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not valued:"))
        .stdout(predicate::str::contains("NOPR"));

    folio(&dir)
        .args(["portfolio", "--date", "2024-03-01", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_foreign_security_needs_rates() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["security", "add", "SPY", "S&P 500 ETF", "--currency", "USD"]);
    run(&dir, &["txn", "add", "SPY", "2", "800", "--date", "2024-01-10"]);
    run(&dir, &["price", "add", "SPY", "500", "--date", "2024-01-10"]);

    folio(&dir)
        .args(["portfolio", "--date", "2024-02-01", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("USD"));

    run(&dir, &["currency", "add", "USD", "US Dollar"]);
    run(&dir, &["currency", "rate", "USD", "0.9", "--date", "2024-01-01"]);

    folio(&dir)
        .args(["portfolio", "--date", "2024-02-01", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("900.00"));
}

#[test]
fn test_export_snapshot_csv_to_stdout() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["export", "snapshot", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Code,Name,Currency,Quantity"))
        .stdout(predicate::str::contains("ACME,Acme Corp,EUR,10,"));
}

#[test]
fn test_export_all_to_file() {
    let dir = portfolio_with_acme();
    let output = dir.path().join("backup.json");

    folio(&dir)
        .args(["export", "all", "--pretty", "--output"])
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["metadata"]["security_count"], 1);
    assert_eq!(value["metadata"]["transaction_count"], 1);
    assert_eq!(value["home_currency"], "EUR");
}

#[test]
fn test_invalid_date_is_reported() {
    let dir = portfolio_with_acme();

    folio(&dir)
        .args(["price", "add", "ACME", "120", "--date", "01/03/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}
