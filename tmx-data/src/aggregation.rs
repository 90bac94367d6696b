//! Monthly aggregation of daily temperature records.

use crate::grid::Grid;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tmx_core::month::{DayReading, MonthKey};
use tmx_core::reading::DailyRecord;

/// Errors raised when records that should have been filtered by the ingestor
/// reach the aggregator.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("non-finite {field} reading on {date}")]
    NonFiniteReading {
        date: NaiveDate,
        field: &'static str,
    },
}

/// The `window_years` most recent distinct years present in `records`,
/// ascending.
pub fn trailing_years(records: &[DailyRecord], window_years: usize) -> Vec<i32> {
    let distinct: BTreeSet<i32> = records.iter().map(DailyRecord::year).collect();
    let skip = distinct.len().saturating_sub(window_years);
    distinct.into_iter().skip(skip).collect()
}

/// Group daily records into a dense year x month grid.
///
/// Only the trailing `window_years` distinct years are kept; records from
/// older years are discarded. Every month of a kept year gets a cell, with
/// months lacking observations marked missing. A window of 0 or an empty
/// input yields a grid with no years.
pub fn aggregate(records: &[DailyRecord], window_years: usize) -> Result<Grid, AggregateError> {
    for record in records {
        check_finite(record)?;
    }

    let years = trailing_years(records, window_years);
    let mut groups: BTreeMap<MonthKey, Vec<DayReading>> = BTreeMap::new();
    let mut discarded = 0usize;
    for record in records {
        if years.binary_search(&record.year()).is_err() {
            discarded += 1;
            continue;
        }
        groups
            .entry(record.month_key())
            .or_default()
            .push(record.day_reading());
    }

    log::debug!(
        "aggregate: {} records into {} months over {:?}, {} outside the window",
        records.len() - discarded,
        groups.len(),
        years,
        discarded
    );
    Ok(Grid::from_groups(years, groups))
}

fn check_finite(record: &DailyRecord) -> Result<(), AggregateError> {
    let field = if !record.tmax.is_finite() {
        "tmax"
    } else if !record.tmin.is_finite() {
        "tmin"
    } else {
        return Ok(());
    };
    Err(AggregateError::NonFiniteReading {
        date: record.date,
        field,
    })
}
