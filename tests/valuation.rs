//! Valuation behaviour through the public API, backed by on-disk storage

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use folio::config::paths::FolioPaths;
use folio::models::{CashEntryType, Money, SecurityId};
use folio::services::{
    CashService, CreateTransactionInput, CurrencyService, DividendService, PortfolioService,
    PriceInput, PriceService, SecurityService, SplitService, TransactionService,
};
use folio::storage::{initialize_storage, Storage};
use folio::valuation::{
    CostBasisAccumulator, FailurePolicy, LookupMode, SnapshotOptions, TimeSeries,
};
use folio::FolioError;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn open(dir: &TempDir) -> Storage {
    let paths = FolioPaths::with_base_dir(dir.path().to_path_buf());
    initialize_storage(&paths, "EUR").unwrap();
    let mut storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    storage
}

fn trade(storage: &Storage, id: SecurityId, date: &str, qty: Decimal, amount: Decimal) {
    TransactionService::new(storage)
        .create(CreateTransactionInput {
            security_id: id,
            date: d(date),
            quantity: qty,
            amount: Money::new(amount),
            fees: Money::zero(),
            memo: None,
        })
        .unwrap();
}

fn price(storage: &Storage, id: SecurityId, date: &str, unit: Decimal) {
    PriceService::new(storage)
        .record(id, d(date), PriceInput::Unit(Money::new(unit)), "")
        .unwrap();
}

#[test]
fn test_interpolation_boundaries() {
    let series = TimeSeries::from_dates([(d("2024-01-01"), dec!(100)), (d("2024-01-11"), dec!(200))]);

    assert_eq!(series.interpolated(d("2023-12-01")), dec!(100));
    assert_eq!(series.interpolated(d("2024-01-06")), dec!(150));
    assert_eq!(series.interpolated(d("2024-02-01")), dec!(200));
    assert_eq!(series.value_on(d("2024-01-06"), LookupMode::Step), dec!(100));
    assert_eq!(series.step(d("2023-12-31")), Decimal::ZERO);
}

#[test]
fn test_cost_basis_buy_then_sell() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let acme = SecurityService::new(&storage).create("ACME", "Acme Corp", "EUR").unwrap();

    trade(&storage, acme.id, "2024-01-10", dec!(10), dec!(1000));
    trade(&storage, acme.id, "2024-02-10", dec!(10), dec!(1400));
    trade(&storage, acme.id, "2024-03-10", dec!(-5), dec!(800));

    let transactions = storage.transactions.get_by_security(acme.id).unwrap();
    let acc = CostBasisAccumulator::accumulate("ACME", &transactions, d("2024-12-31")).unwrap();

    assert_eq!(acc.quantity(), dec!(15));
    assert_eq!(acc.cost().amount(), dec!(1800));
    assert_eq!(acc.average_unit_cost().unwrap().amount(), dec!(120));
}

#[test]
fn test_oversell_leaves_no_partial_state() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let acme = SecurityService::new(&storage).create("ACME", "Acme Corp", "EUR").unwrap();
    trade(&storage, acme.id, "2024-01-10", dec!(10), dec!(1000));

    let err = TransactionService::new(&storage)
        .create(CreateTransactionInput {
            security_id: acme.id,
            date: d("2024-02-01"),
            quantity: dec!(-11),
            amount: Money::new(dec!(1100)),
            fees: Money::zero(),
            memo: None,
        })
        .unwrap_err();

    assert!(matches!(err, FolioError::NegativeHoldings { .. }));
    assert_eq!(storage.transactions.count().unwrap(), 1);
}

#[test]
fn test_split_keeps_home_value_for_foreign_security() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let usd = CurrencyService::new(&storage).create("USD", "US Dollar").unwrap();
    CurrencyService::new(&storage)
        .add_rate(usd.id, d("2024-01-01"), dec!(0.9))
        .unwrap();
    let spy = SecurityService::new(&storage).create("SPY", "S&P 500", "USD").unwrap();
    trade(&storage, spy.id, "2024-01-10", dec!(4), dec!(1800));
    price(&storage, spy.id, "2024-01-10", dec!(500));

    let portfolio = PortfolioService::new(&storage, "EUR");
    let before = portfolio.current_value(spy.id, d("2024-03-01"), LookupMode::Step).unwrap();
    let held_before = portfolio.units_held(spy.id, d("2024-03-01")).unwrap();

    SplitService::new(&storage)
        .apply_split(spy.id, d("2024-03-01"), dec!(16))
        .unwrap();

    let after = portfolio.current_value(spy.id, d("2024-03-01"), LookupMode::Step).unwrap();
    let held_after = portfolio.units_held(spy.id, d("2024-03-01")).unwrap();

    assert_eq!(held_after, dec!(16));
    assert_eq!(before * held_before, after * held_after);

    let snapshot = portfolio
        .snapshot(&SnapshotOptions::new(d("2024-03-01")))
        .unwrap();
    let holding = snapshot.holding("SPY").unwrap();
    assert_eq!(holding.cost.amount(), dec!(1800));
    assert_eq!(holding.market_value.amount(), dec!(1800));
}

#[test]
fn test_ledger_balance_matches_activity() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let cash = CashService::new(&storage);
    let acme = SecurityService::new(&storage).create("ACME", "Acme Corp", "EUR").unwrap();

    cash.record(d("2024-01-01"), CashEntryType::Deposit, Money::new(dec!(5000)), "Opening")
        .unwrap();
    trade(&storage, acme.id, "2024-01-10", dec!(10), dec!(1000));
    DividendService::new(&storage)
        .record(acme.id, d("2024-03-01"), Money::new(dec!(25)), "")
        .unwrap();
    cash.record(d("2024-04-01"), CashEntryType::Withdrawal, Money::new(dec!(500)), "Holiday")
        .unwrap();

    assert_eq!(cash.balance_as_of(d("2024-01-09")).unwrap().amount(), dec!(5000));
    assert_eq!(cash.balance_as_of(d("2024-03-01")).unwrap().amount(), dec!(4025));
    assert_eq!(cash.balance_as_of(d("2024-12-31")).unwrap().amount(), dec!(3525));
    assert_eq!(cash.ledger().unwrap().len(), 4);
}

#[test]
fn test_snapshot_inclusion_and_policies() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let securities = SecurityService::new(&storage);
    let acme = securities.create("ACME", "Acme Corp", "EUR").unwrap();
    let gone = securities.create("GONE", "Sold Out", "EUR").unwrap();
    let bare = securities.create("BARE", "No Price", "EUR").unwrap();

    trade(&storage, acme.id, "2024-01-10", dec!(10), dec!(1000));
    price(&storage, acme.id, "2024-01-10", dec!(100));
    trade(&storage, gone.id, "2024-01-10", dec!(5), dec!(500));
    trade(&storage, gone.id, "2024-02-10", dec!(-5), dec!(600));
    price(&storage, gone.id, "2024-02-10", dec!(120));

    let portfolio = PortfolioService::new(&storage, "EUR");
    let as_of = d("2024-03-01");

    let snapshot = portfolio.snapshot(&SnapshotOptions::new(as_of)).unwrap();
    assert!(snapshot.holding("ACME").is_some());
    assert!(snapshot.holding("GONE").is_none());
    assert!(snapshot.holding("BARE").is_none());
    assert!(snapshot.is_complete());

    trade(&storage, bare.id, "2024-01-20", dec!(1), dec!(10));
    let skipped = portfolio.snapshot(&SnapshotOptions::new(as_of)).unwrap();
    assert_eq!(skipped.failures.len(), 1);
    assert_eq!(skipped.failures[0].security.code, "BARE");

    let all = portfolio
        .snapshot(&SnapshotOptions::new(as_of).include_closed(true))
        .unwrap();
    let closed = all.holding("GONE").unwrap();
    assert!(closed.is_closed());
    assert!(closed.cost.is_zero());
    assert!(closed.average_unit_cost.is_none());

    let strict = portfolio.snapshot(&SnapshotOptions::new(as_of).failure_policy(FailurePolicy::Abort));
    assert!(strict.is_err());
}

#[test]
fn test_records_survive_reload() {
    let dir = TempDir::new().unwrap();
    let acme_id = {
        let storage = open(&dir);
        let acme = SecurityService::new(&storage).create("ACME", "Acme Corp", "EUR").unwrap();
        trade(&storage, acme.id, "2024-01-10", dec!(2.5), dec!(250.125));
        acme.id
    };

    let storage = open(&dir);
    let transactions = storage.transactions.get_by_security(acme_id).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].quantity, dec!(2.5));
    assert_eq!(transactions[0].amount.amount(), dec!(250.125));
    assert_eq!(
        storage.securities.get_by_code("acme").unwrap().unwrap().name,
        "Acme Corp"
    );
}
