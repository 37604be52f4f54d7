//! Valuation engine
//!
//! Pure computations over stored records: dated series lookups, average-cost
//! accounting, currency conversion, portfolio snapshots, the cash ledger and
//! split planning. Everything here reads through [`RecordSource`] and never
//! writes; persisting results is the job of the services layer.

pub mod cost_basis;
pub mod currency;
pub mod ledger;
pub mod snapshot;
pub mod source;
pub mod split;
pub mod time_series;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cost_basis::{units_held, CostBasisAccumulator};
pub use currency::CurrencyConverter;
pub use ledger::{balance_as_of, build_cash_ledger, CashCategory, CashLedger, CashLedgerEntry};
pub use snapshot::{
    build_snapshot, unit_value, FailurePolicy, Holding, HoldingFailure, Snapshot, SnapshotOptions,
};
pub use source::RecordSource;
pub use split::{plan_split, SplitPlan};
pub use time_series::{LookupMode, TimeSeries};
