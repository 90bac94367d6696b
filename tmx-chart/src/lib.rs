//! Visual mapping and interaction for the temperature matrix.
//!
//! This crate provides:
//! - `scale`: linear scales with "nice" bounds and tick generation
//! - `color`: the fixed-domain temperature color scale
//! - `legend`: gradient stops and ticks sampled from the color scale
//! - `sparkline`: per-cell daily min/max polylines
//! - `layout`: matrix geometry (margins, cell sizes, positions)
//! - `view`: a grid plus everything derived from it, computed once
//! - `tooltip`: hover content for a cell
//! - `state`: display mode, tooltip visibility and load sequencing
//! - `svg`: renders a view to an SVG document

pub mod color;
pub mod layout;
pub mod legend;
pub mod scale;
pub mod sparkline;
pub mod state;
pub mod svg;
pub mod tooltip;
pub mod view;
