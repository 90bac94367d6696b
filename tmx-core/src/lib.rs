//! Core types for the temperature matrix.
//!
//! - `reading`: daily records and the CSV ingestor that produces them
//! - `month`: the `MonthKey` grouping key and the aggregated `MonthCell`
//! - `mode`: which monthly statistic drives the display

pub mod mode;
pub mod month;
pub mod reading;
