use crate::month::{DayReading, MonthKey};
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tmx_utils::dates::parse_date;

/// Header of the date column: "YYYY-MM-DD"
pub const DATE_COLUMN: &str = "date";

/// Header of the daily maximum temperature column, in Celsius.
pub const MAX_TEMPERATURE_COLUMN: &str = "max_temperature";

/// Header of the daily minimum temperature column, in Celsius.
pub const MIN_TEMPERATURE_COLUMN: &str = "min_temperature";

/// A single day's temperature readings.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub tmax: f64,
    pub tmin: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, tmax: f64, tmin: f64) -> Self {
        DailyRecord { date, tmax, tmin }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(&self.date)
    }

    /// The record as a day-of-month reading inside its month.
    pub fn day_reading(&self) -> DayReading {
        DayReading {
            day: self.date.day(),
            date: self.date,
            tmax: self.tmax,
            tmin: self.tmin,
        }
    }

    fn try_from_row(row: &StringRecord, columns: &ColumnIndex) -> anyhow::Result<Self> {
        let field = |index: usize, name: &'static str| {
            row.get(index)
                .map(str::trim)
                .ok_or_else(|| anyhow::anyhow!("row has no `{name}` field"))
        };
        let date = parse_date(field(columns.date, DATE_COLUMN)?)?;
        let tmax = parse_reading(field(columns.tmax, MAX_TEMPERATURE_COLUMN)?)?;
        let tmin = parse_reading(field(columns.tmin, MIN_TEMPERATURE_COLUMN)?)?;
        Ok(DailyRecord { date, tmax, tmin })
    }
}

fn parse_reading(value: &str) -> anyhow::Result<f64> {
    let reading: f64 = value
        .parse()
        .map_err(|e| anyhow::anyhow!("bad reading `{value}`: {e}"))?;
    if !reading.is_finite() {
        anyhow::bail!("non-finite reading `{value}`");
    }
    Ok(reading)
}

/// Positions of the required columns within a CSV row.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    tmax: usize,
    tmin: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| anyhow::anyhow!("temperature CSV has no `{name}` column"))
        };
        Ok(ColumnIndex {
            date: find(DATE_COLUMN)?,
            tmax: find(MAX_TEMPERATURE_COLUMN)?,
            tmin: find(MIN_TEMPERATURE_COLUMN)?,
        })
    }
}

/// Result of ingesting a daily temperature CSV.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct IngestReport {
    pub records: Vec<DailyRecord>,
    /// Rows dropped because their date or readings could not be parsed.
    pub skipped: usize,
}

/// Parse a daily temperature CSV into records.
///
/// Expected format (with headers, extra columns ignored):
/// ```text
/// date,max_temperature,min_temperature
/// 2023-01-15,31,22
/// ```
/// Rows with an unparseable date or reading are skipped and counted; a
/// missing required header is an error.
pub fn parse_daily_csv(csv_data: &str) -> anyhow::Result<IngestReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut report = IngestReport::default();
    for (index, result) in rdr.records().enumerate() {
        let row = result?;
        match DailyRecord::try_from_row(&row, &columns) {
            Ok(record) => report.records.push(record),
            Err(e) => {
                // +2: one for the header, one for 1-based line numbers
                log::warn!("skipping CSV line {}: {}", index + 2, e);
                report.skipped += 1;
            }
        }
    }
    log::info!(
        "Parsed {} daily records, skipped {} malformed rows",
        report.records.len(),
        report.skipped
    );
    Ok(report)
}
