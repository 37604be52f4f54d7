//! Dated value series with step and interpolated lookup
//!
//! Prices and exchange rates are both entered sporadically. A series answers
//! "what was the value on this date" in one of two ways:
//!
//! - **step**: the most recent value on or before the date, held constant
//!   until the next entry (a quoted price stays current until updated)
//! - **interpolated**: a straight line between the two entries bracketing
//!   the date, flat before the first entry and after the last one
//!
//! Ordering and equality compare calendar days only. Interpolation weights
//! use the full elapsed time between the bracketing timestamps.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::date::start_of_day;

/// How a series is read between entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Last known value on or before the date
    #[default]
    Step,
    /// Linear interpolation between bracketing entries
    Interpolated,
}

impl LookupMode {
    /// Parse lookup mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "step" | "last" => Some(Self::Step),
            "interpolated" | "interpolate" | "linear" => Some(Self::Interpolated),
            _ => None,
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step => write!(f, "step"),
            Self::Interpolated => write!(f, "interpolated"),
        }
    }
}

/// One sample of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub at: NaiveDateTime,
    pub value: Decimal,
}

/// Samples sorted by ascending timestamp
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Build a series from timestamped samples in any order
    pub fn new<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, Decimal)>,
    {
        let mut points: Vec<SeriesPoint> = samples
            .into_iter()
            .map(|(at, value)| SeriesPoint { at, value })
            .collect();
        // Stable: same-day entries keep their input order
        points.sort_by_key(|p| p.at);
        Self { points }
    }

    /// Build a series from dated samples, each taken at the start of its day
    pub fn from_dates<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        Self::new(
            samples
                .into_iter()
                .map(|(date, value)| (start_of_day(date), value)),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Read the series on `on` using `mode`
    pub fn value_on(&self, on: NaiveDate, mode: LookupMode) -> Decimal {
        match mode {
            LookupMode::Step => self.step(on),
            LookupMode::Interpolated => self.interpolated(on),
        }
    }

    /// Like [`value_on`](Self::value_on), but `None` when the series has
    /// nothing to say about `on`
    ///
    /// Step lookups need a point dated on or before `on`. Interpolated
    /// lookups clamp at both ends, so they only need a non-empty series.
    pub fn lookup(&self, on: NaiveDate, mode: LookupMode) -> Option<Decimal> {
        match mode {
            LookupMode::Step => self.last_on_or_before(on).map(|p| p.value),
            LookupMode::Interpolated if self.is_empty() => None,
            LookupMode::Interpolated => Some(self.interpolated(on)),
        }
    }

    /// Value of the latest point dated on or before `on`; zero if there is none
    pub fn step(&self, on: NaiveDate) -> Decimal {
        self.last_on_or_before(on)
            .map(|p| p.value)
            .unwrap_or(Decimal::ZERO)
    }

    fn last_on_or_before(&self, on: NaiveDate) -> Option<&SeriesPoint> {
        let idx = self.points.partition_point(|p| p.at.date() <= on);
        idx.checked_sub(1).map(|i| &self.points[i])
    }

    /// Interpolated value at the start of `on`
    pub fn interpolated(&self, on: NaiveDate) -> Decimal {
        self.interpolated_at(start_of_day(on))
    }

    /// Interpolated value at an exact timestamp
    pub fn interpolated_at(&self, on: NaiveDateTime) -> Decimal {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Decimal::ZERO,
        };

        let day = on.date();
        // Same-day points resolve to the last one entered, as in `step`
        if let Some(exact) = self.last_on_or_before(day).filter(|p| p.at.date() == day) {
            return exact.value;
        }
        if day < first.at.date() {
            return first.value;
        }
        if day > last.at.date() {
            return last.value;
        }

        for pair in self.points.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);

            if after.at.date() > day {
                // before.date < day < after.date, so the interval is non-empty
                let interval = (after.at - before.at).num_seconds();
                let elapsed = (on - before.at).num_seconds();
                if interval <= 0 {
                    return after.value;
                }
                let fraction = Decimal::from(elapsed) / Decimal::from(interval);
                return before.value + (after.value - before.value) * fraction;
            }
        }

        last.value
    }
}

impl FromIterator<(NaiveDate, Decimal)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Decimal)>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}
