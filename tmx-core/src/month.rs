use crate::mode::Mode;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tmx_utils::dates::month_label;

/// Number of months in every grid row.
pub const MONTHS_PER_YEAR: u32 = 12;

/// A calendar (year, month) pair, used as the grouping and lookup key for
/// monthly cells. Months run 1..=12.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Create a MonthKey, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        (1..=MONTHS_PER_YEAR)
            .contains(&month)
            .then_some(MonthKey { year, month })
    }

    /// The key of the month containing `date`.
    pub fn from_date(date: &NaiveDate) -> MonthKey {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    /// All twelve keys of a calendar year, January first.
    pub fn months_of(year: i32) -> impl Iterator<Item = MonthKey> {
        (1..=MONTHS_PER_YEAR).map(move |month| MonthKey { year, month })
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(value: NaiveDate) -> Self {
        MonthKey::from_date(&value)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&month_label(self.year, self.month))
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    /// Parse "YYYY-MM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("expected YYYY-MM, got `{s}`"))?;
        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;
        MonthKey::new(year, month).ok_or_else(|| anyhow::anyhow!("month out of range in `{s}`"))
    }
}

/// One day's readings inside a month, keyed by day of month.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DayReading {
    pub day: u32,
    pub date: NaiveDate,
    pub tmax: f64,
    pub tmin: f64,
}

/// A single grid entry. Either populated with the month's daily readings and
/// their extrema, or a placeholder for a month with no observations.
///
/// A placeholder has `missing == true`, no days, and `None` extrema; a
/// genuine 0 °C month is never represented that way.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MonthCell {
    pub year: i32,
    pub month: u32,
    /// Sorted ascending by `day`.
    pub days: Vec<DayReading>,
    pub monthly_max: Option<f64>,
    pub monthly_min: Option<f64>,
    pub missing: bool,
}

impl MonthCell {
    /// A cell for a month with no observations.
    pub fn placeholder(key: MonthKey) -> MonthCell {
        MonthCell {
            year: key.year,
            month: key.month,
            days: Vec::new(),
            monthly_max: None,
            monthly_min: None,
            missing: true,
        }
    }

    /// Build a cell from a month's readings in any order.
    ///
    /// Days are sorted ascending; an empty vector yields a placeholder.
    pub fn from_days(key: MonthKey, mut days: Vec<DayReading>) -> MonthCell {
        if days.is_empty() {
            return MonthCell::placeholder(key);
        }
        days.sort_by_key(|reading| reading.day);
        let monthly_max = days.iter().map(|d| d.tmax).fold(f64::MIN, f64::max);
        let monthly_min = days.iter().map(|d| d.tmin).fold(f64::MAX, f64::min);
        MonthCell {
            year: key.year,
            month: key.month,
            days,
            monthly_max: Some(monthly_max),
            monthly_min: Some(monthly_min),
            missing: false,
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }

    /// The statistic that drives this cell's fill in the given mode.
    pub fn display_value(&self, mode: Mode) -> Option<f64> {
        match mode {
            Mode::Max => self.monthly_max,
            Mode::Min => self.monthly_min,
        }
    }

    /// Largest day of month with data.
    pub fn last_day(&self) -> Option<u32> {
        self.days.iter().map(|d| d.day).max()
    }

    /// (lowest daily low, highest daily high) across the month.
    pub fn temperature_extent(&self) -> Option<(f64, f64)> {
        self.monthly_min.zip(self.monthly_max)
    }
}
