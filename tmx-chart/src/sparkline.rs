//! Per-cell micro-charts of the daily highs and lows.
//!
//! Each cell gets its own vertical scale fitted to that month's readings, so
//! small swings stay visible in months with a narrow range. This is separate
//! from the fixed domain used for fills.

use crate::scale::{LinearScale, NICE_TICK_COUNT};
use serde::Serialize;
use std::fmt::Write;
use tmx_core::month::MonthCell;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The two polylines of a cell, in ascending day order and in coordinates
/// local to the sparkline area (origin top-left).
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SparklinePath {
    pub max: Vec<Point>,
    pub min: Vec<Point>,
}

impl SparklinePath {
    /// SVG path data for the daily highs.
    pub fn max_path_data(&self) -> String {
        path_data(&self.max)
    }

    /// SVG path data for the daily lows.
    pub fn min_path_data(&self) -> String {
        path_data(&self.min)
    }
}

/// `M x,y L x,y ...` without spaces. A single point yields a bare move-to.
pub fn path_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(data, "{command}{},{}", point.x, point.y);
    }
    data
}

/// Compute the sparkline for `cell` inside an area of the given size.
///
/// Returns `None` for missing cells. x maps day 1..=last day onto
/// `[0, inner_width]`; y maps the niced [lowest low, highest high] onto
/// `[inner_height, 0]`, so warmer is higher.
pub fn sparkline_path(cell: &MonthCell, inner_width: f64, inner_height: f64) -> Option<SparklinePath> {
    if cell.missing {
        return None;
    }
    let last_day = cell.last_day()?;
    let (low, high) = cell.temperature_extent()?;

    let x = LinearScale::new((1.0, f64::from(last_day)), (0.0, inner_width));
    let y = LinearScale::new((low, high), (inner_height, 0.0)).nice(NICE_TICK_COUNT);

    let project = |day: u32, value: f64| Point {
        x: x.apply(f64::from(day)),
        y: y.apply(value),
    };
    Some(SparklinePath {
        max: cell.days.iter().map(|d| project(d.day, d.tmax)).collect(),
        min: cell.days.iter().map(|d| project(d.day, d.tmin)).collect(),
    })
}
