//! Reporting period identifiers and the reporting window index
//!
//! A period is identified by the date of its first instant: the first of the
//! month for monthly buckets, the day itself for daily buckets. The window
//! index is the ordered list of period starts the report is configured to
//! cover.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a reporting bucket by its start date
///
/// Totally ordered by date; equality is exact date match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PeriodId(NaiveDate);

impl PeriodId {
    /// Create a period id from a date
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create a period id from year/month/day, if the date is valid
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying start date
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// The start of the month containing this period
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).expect("day 1 is always valid"))
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for PeriodId {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

/// Reporting bucket granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Daily buckets
    Daily,
    /// Monthly buckets (default)
    #[default]
    Monthly,
}

impl Granularity {
    /// Label used for the date column of the summary table
    pub fn row_label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Date",
            Granularity::Monthly => "Month",
        }
    }
}

/// The ordered list of period starts a report covers
///
/// Built once per run from the configured window; every pipeline stage takes
/// it as an argument rather than consulting the wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodIndex {
    periods: Vec<PeriodId>,
}

impl PeriodIndex {
    /// Build an index from an already-ordered list of period starts
    pub fn new(mut periods: Vec<PeriodId>) -> Self {
        periods.sort();
        periods.dedup();
        Self { periods }
    }

    /// The `count` trailing buckets ending just before `reference`.
    ///
    /// Monthly: the `count` month starts before the first of `reference`'s
    /// month (the in-progress month is excluded). Daily: the `count` days
    /// before `reference` itself.
    pub fn trailing(granularity: Granularity, count: usize, reference: NaiveDate) -> Self {
        let mut periods = Vec::with_capacity(count);
        match granularity {
            Granularity::Monthly => {
                let mut cursor = reference.with_day(1).expect("day 1 is always valid");
                for _ in 0..count {
                    cursor = prev_month_start(cursor);
                    periods.push(PeriodId::new(cursor));
                }
            }
            Granularity::Daily => {
                for back in 1..=count {
                    periods.push(PeriodId::new(reference - Duration::days(back as i64)));
                }
            }
        }
        periods.reverse();
        Self { periods }
    }

    /// The ordered period starts
    pub fn periods(&self) -> &[PeriodId] {
        &self.periods
    }

    /// Earliest period in the window
    pub fn first(&self) -> Option<PeriodId> {
        self.periods.first().copied()
    }

    /// Latest period in the window
    pub fn last(&self) -> Option<PeriodId> {
        self.periods.last().copied()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn contains(&self, period: PeriodId) -> bool {
        self.periods.binary_search(&period).is_ok()
    }
}

/// First of the month preceding the month containing `date` (which must be a
/// month start).
fn prev_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 is always valid")
}
