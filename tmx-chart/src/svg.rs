//! SVG rendering of a [`MatrixView`].
//!
//! The document contains the year axis along the top, month names down the
//! left, one group per cell (background, hover title, sparklines) and the
//! gradient legend to the right of the grid.

use crate::legend::LEGEND_TICK_COUNT;
use crate::tooltip::TooltipContent;
use crate::view::MatrixView;
use std::borrow::Cow;
use std::fmt::{self, Write};
use tmx_core::mode::Mode;
use tmx_utils::dates::month_name;
use tmx_utils::numbers::round_half_up;

const AXIS_COLOR: &str = "#111827";
const CELL_STROKE: &str = "rgba(0,0,0,0.12)";
const GRADIENT_ID: &str = "tempLegendGrad";
const FONT_SIZE: u32 = 12;
const LINE_WIDTH: f64 = 1.5;
/// Length of the year ticks above the axis line.
const YEAR_TICK: f64 = 6.0;
const YEAR_LABEL_Y: f64 = -26.0;
const MONTH_LABEL_X: f64 = -14.0;

/// Render the whole matrix with cells colored by `mode`.
pub fn render(view: &MatrixView, mode: Mode) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_svg(&mut out, view, mode)?;
    Ok(out)
}

pub fn write_svg<W: Write>(out: &mut W, view: &MatrixView, mode: Mode) -> fmt::Result {
    let layout = view.layout();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" data-mode="{mode}">"#,
        w = num(view.width()),
        h = num(view.height()),
    )?;
    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(layout.margin.left),
        num(layout.margin.top)
    )?;

    if view.grid().is_empty() {
        writeln!(
            out,
            r#"<text x="0" y="{}" font-size="{FONT_SIZE}" fill="{AXIS_COLOR}">No data</text>"#,
            num(layout.cell.height / 2.0)
        )?;
    } else {
        write_axis(out, view)?;
        write_month_labels(out, view)?;
        write_cells(out, view, mode)?;
    }
    write_legend(out, view)?;

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

fn write_axis<W: Write>(out: &mut W, view: &MatrixView) -> fmt::Result {
    let layout = view.layout();
    let y = layout.axis_y;
    writeln!(
        out,
        r#"<line x1="0" x2="{}" y1="{y}" y2="{y}" stroke="{AXIS_COLOR}" stroke-width="{LINE_WIDTH}"/>"#,
        num(view.grid_width()),
        y = num(y),
    )?;
    for (column, year) in view.grid().years.iter().enumerate() {
        let cx = num(layout.column_center(column));
        writeln!(
            out,
            r#"<g><line x1="{cx}" x2="{cx}" y1="{}" y2="{}" stroke="{AXIS_COLOR}" stroke-width="{LINE_WIDTH}"/><text x="{cx}" y="{}" text-anchor="middle" font-size="{FONT_SIZE}" fill="{AXIS_COLOR}">{year}</text></g>"#,
            num(y),
            num(y - YEAR_TICK),
            num(YEAR_LABEL_Y),
        )?;
    }
    Ok(())
}

fn write_month_labels<W: Write>(out: &mut W, view: &MatrixView) -> fmt::Result {
    let layout = view.layout();
    for &month in &view.grid().months {
        let Some(name) = month_name(month) else {
            continue;
        };
        let y = layout.cell_origin(0, month).y + layout.cell.height / 2.0 + 4.0;
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="end" font-size="{FONT_SIZE}" fill="{AXIS_COLOR}">{name}</text>"#,
            num(MONTH_LABEL_X),
            num(y),
        )?;
    }
    Ok(())
}

fn write_cells<W: Write>(out: &mut W, view: &MatrixView, mode: Mode) -> fmt::Result {
    let layout = view.layout();
    for (cell, sparkline) in view.cells() {
        let Some(origin) = view.cell_origin(cell.key()) else {
            continue;
        };
        let title = TooltipContent::for_cell(cell, mode).to_string();
        writeln!(
            out,
            r#"<g transform="translate({},{})" data-key="{}">"#,
            num(origin.x),
            num(origin.y),
            cell.key()
        )?;
        writeln!(out, "<title>{}</title>", escape(&title))?;
        writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="{}" stroke="{CELL_STROKE}" stroke-width="1"/>"#,
            num(layout.cell.width),
            num(layout.cell.height),
            view.fill_for(cell, mode)
        )?;
        if let Some(path) = sparkline {
            writeln!(
                out,
                r#"<g transform="translate({},{})">"#,
                num(layout.sparkline_margin.left),
                num(layout.sparkline_margin.top)
            )?;
            writeln!(
                out,
                r#"<path d="{}" stroke="{}" stroke-width="{LINE_WIDTH}" fill="none"/>"#,
                path.max_path_data(),
                layout.max_line
            )?;
            writeln!(
                out,
                r#"<path d="{}" stroke="{}" stroke-width="{LINE_WIDTH}" fill="none"/>"#,
                path.min_path_data(),
                layout.min_line
            )?;
            writeln!(out, "</g>")?;
        }
        writeln!(out, "</g>")?;
    }
    Ok(())
}

fn write_legend<W: Write>(out: &mut W, view: &MatrixView) -> fmt::Result {
    let layout = view.layout();
    let legend = view.legend();
    let origin = layout.legend_origin(view.grid().years.len());
    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(origin.x),
        num(origin.y)
    )?;
    writeln!(
        out,
        r#"<defs><linearGradient id="{GRADIENT_ID}" x1="0%" y1="0%" x2="0%" y2="100%">"#
    )?;
    for stop in legend.stops() {
        writeln!(
            out,
            r#"<stop offset="{}%" stop-color="{}"/>"#,
            num(stop.offset * 100.0),
            stop.color
        )?;
    }
    writeln!(out, "</linearGradient></defs>")?;
    writeln!(
        out,
        r#"<text x="0" y="-10" font-size="{FONT_SIZE}" font-weight="600" fill="{AXIS_COLOR}">Celsius</text>"#
    )?;
    writeln!(
        out,
        r#"<rect width="{}" height="{}" fill="url(#{GRADIENT_ID})"/>"#,
        num(layout.legend_width),
        num(legend.height())
    )?;
    for tick in legend.ticks(LEGEND_TICK_COUNT) {
        writeln!(
            out,
            r#"<g transform="translate({},{})"><line x1="0" x2="6" y1="0" y2="0" stroke="{AXIS_COLOR}" stroke-width="1"/><text x="10" y="4" font-size="{FONT_SIZE}" fill="{AXIS_COLOR}">{}</text></g>"#,
            num(layout.legend_width),
            num(tick.offset),
            num(tick.value)
        )?;
    }
    writeln!(out, "</g>")
}

/// Coordinates rounded to 3 decimals, printed without trailing zeros.
fn num(value: f64) -> f64 {
    let rounded = round_half_up(value * 1000.0) / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
