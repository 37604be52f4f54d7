//! Portfolio snapshot: every holding valued on one date
//!
//! For each security, in code order:
//!
//! 1. replay its transactions up to the date into an average-cost position
//! 2. total its dividends up to the date
//! 3. drop it if the position is closed, unless closed positions are wanted
//! 4. look up its price and convert it into the home currency
//! 5. derive market value, gain and return
//!
//! A security that cannot be valued (oversold, unknown currency, ...) is
//! either skipped and recorded in [`Snapshot::failures`] or aborts the whole
//! snapshot, depending on the [`FailurePolicy`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::cost_basis::CostBasisAccumulator;
use super::currency::CurrencyConverter;
use super::source::RecordSource;
use super::time_series::{LookupMode, TimeSeries};
use crate::error::{FolioError, FolioResult};
use crate::models::{Money, Price, Security};

/// What to do when one security cannot be valued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Leave the security out and carry on
    #[default]
    Skip,
    /// Fail the whole snapshot
    Abort,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl FailurePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "abort" | "strict" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Parameters for [`build_snapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub as_of: NaiveDate,
    pub include_closed: bool,
    pub price_lookup: LookupMode,
    pub failure_policy: FailurePolicy,
}

impl SnapshotOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            include_closed: false,
            price_lookup: LookupMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn include_closed(mut self, include: bool) -> Self {
        self.include_closed = include;
        self
    }

    pub fn price_lookup(mut self, mode: LookupMode) -> Self {
        self.price_lookup = mode;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// One security's valuation; all amounts in the home currency
#[derive(Debug, Clone, Serialize)]
pub struct Holding {
    pub security: Security,
    pub quantity: Decimal,
    /// Total cost of the units held
    pub cost: Money,
    /// Absent for a closed position
    pub average_unit_cost: Option<Money>,
    /// Unit price on the snapshot date
    pub current_price: Money,
    pub market_value: Money,
    pub total_dividends: Money,
    /// Unrealized gain on the units held plus dividends received
    pub gain: Money,
    /// Gain as a percentage of cost; absent when cost is zero
    pub return_pct: Option<Decimal>,
}

impl Holding {
    pub fn is_closed(&self) -> bool {
        self.quantity.is_zero()
    }
}

/// A security left out of a snapshot, and why
#[derive(Debug)]
pub struct HoldingFailure {
    pub security: Security,
    pub error: FolioError,
}

/// Valuation of the whole portfolio on one date
#[derive(Debug)]
pub struct Snapshot {
    pub as_of: NaiveDate,
    pub home_currency: String,
    pub holdings: Vec<Holding>,
    pub failures: Vec<HoldingFailure>,
}

impl Snapshot {
    fn new(as_of: NaiveDate, home_currency: &str) -> Self {
        Self {
            as_of,
            home_currency: home_currency.to_string(),
            holdings: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn total_market_value(&self) -> Money {
        self.holdings.iter().map(|h| h.market_value).sum()
    }

    pub fn total_cost(&self) -> Money {
        self.holdings.iter().map(|h| h.cost).sum()
    }

    pub fn total_dividends(&self) -> Money {
        self.holdings.iter().map(|h| h.total_dividends).sum()
    }

    pub fn total_gain(&self) -> Money {
        self.holdings.iter().map(|h| h.gain).sum()
    }

    /// Total gain as a percentage of total cost
    pub fn total_return_pct(&self) -> Option<Decimal> {
        percentage(self.total_gain(), self.total_cost())
    }

    /// True when no security was skipped
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn holding(&self, code: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.security.code.eq_ignore_ascii_case(code))
    }
}

/// Value every security in `source` on `options.as_of`
pub fn build_snapshot<S: RecordSource + ?Sized>(
    source: &S,
    home_currency: &str,
    options: &SnapshotOptions,
) -> FolioResult<Snapshot> {
    let mut securities = source.list_securities()?;
    securities.sort_by(|a, b| a.code.cmp(&b.code));

    let converter = load_converter(source, home_currency, &securities)?;
    let mut snapshot = Snapshot::new(options.as_of, converter.home_currency());

    for security in securities {
        match value_holding(source, &converter, &security, options) {
            Ok(Some(holding)) => snapshot.holdings.push(holding),
            Ok(None) => {}
            Err(error) => match options.failure_policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Skip => {
                    tracing::warn!(security = %security.code, %error, "skipping security in snapshot");
                    snapshot.failures.push(HoldingFailure { security, error });
                }
            },
        }
    }

    tracing::debug!(
        as_of = %options.as_of,
        holdings = snapshot.holdings.len(),
        skipped = snapshot.failures.len(),
        "built portfolio snapshot"
    );

    Ok(snapshot)
}

/// Converter loaded with the rates of every currency the securities trade in
pub fn load_converter<S: RecordSource + ?Sized>(
    source: &S,
    home_currency: &str,
    securities: &[Security],
) -> FolioResult<CurrencyConverter> {
    let mut converter = CurrencyConverter::new(home_currency);

    let codes: BTreeSet<String> = securities
        .iter()
        .filter(|s| !converter.is_home(&s.currency))
        .map(|s| s.currency.to_uppercase())
        .collect();

    for code in codes {
        // Unregistered currencies stay unknown; the affected securities fail on their own
        if let Some(currency) = source.get_currency_by_code(&code)? {
            let rates = source.list_exchange_rates(currency.id)?;
            converter.add_rate_records(&code, &rates);
        }
    }

    Ok(converter)
}

/// Value one security; `None` when it is closed and closed positions are not wanted
pub fn value_holding<S: RecordSource + ?Sized>(
    source: &S,
    converter: &CurrencyConverter,
    security: &Security,
    options: &SnapshotOptions,
) -> FolioResult<Option<Holding>> {
    let transactions = source.list_transactions(security.id)?;
    let position = CostBasisAccumulator::accumulate(&security.code, &transactions, options.as_of)?;

    let total_dividends: Money = source
        .list_dividends(security.id)?
        .iter()
        .filter(|d| d.date <= options.as_of)
        .map(|d| d.amount)
        .sum();

    if position.is_closed() && !options.include_closed {
        return Ok(None);
    }

    let current_price = match unit_value(source, converter, security, options.as_of, options.price_lookup) {
        Ok(price) => price,
        // a closed position is worth nothing whatever the price
        Err(e) if position.is_closed() && e.is_not_found() => {
            tracing::debug!(security = %security.code, error = %e, "closed position has no unit value");
            Money::zero()
        }
        Err(e) => return Err(e),
    };

    let quantity = position.quantity();
    let cost = position.cost();
    let average_unit_cost = if position.is_closed() {
        None
    } else {
        Some(position.average_unit_cost()?)
    };

    let market_value = current_price * quantity;
    let gain = (current_price - average_unit_cost.unwrap_or_default()) * quantity + total_dividends;

    Ok(Some(Holding {
        security: security.clone(),
        quantity,
        cost,
        average_unit_cost,
        current_price,
        market_value,
        total_dividends,
        gain,
        return_pct: percentage(gain, cost),
    }))
}

/// Unit price of `security` on `date`, converted into the home currency
///
/// Fails with `NotFound` when there is no price to read on `date` or the
/// trading currency has no rate for it.
pub fn unit_value<S: RecordSource + ?Sized>(
    source: &S,
    converter: &CurrencyConverter,
    security: &Security,
    date: NaiveDate,
    mode: LookupMode,
) -> FolioResult<Money> {
    let prices = source.list_prices(security.id)?;
    let local = price_series(&prices)
        .lookup(date, mode)
        .map(Money::new)
        .ok_or_else(|| FolioError::price_not_found(format!("{} on {}", security.code, date)))?;
    converter.value_in_home(local, &security.currency, date)
}

/// Price records as a series in the trading currency
pub fn price_series(prices: &[Price]) -> TimeSeries {
    prices.iter().map(|p| (p.date, p.price.amount())).collect()
}

fn percentage(part: Money, whole: Money) -> Option<Decimal> {
    if whole.is_zero() {
        None
    } else {
        Some(part.amount() / whole.amount() * Decimal::ONE_HUNDRED)
    }
}
