//! Matrix geometry.
//!
//! Years run left to right, months top to bottom. All positions returned
//! here are relative to the grid origin, i.e. already inside the outer
//! margin.

use crate::color::Rgb;
use crate::sparkline::Point;
use serde::{Deserialize, Serialize};
use tmx_core::month::MONTHS_PER_YEAR;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Size of one cell and the gaps between cells.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
    pub pad_x: f64,
    pub pad_y: f64,
}

/// Everything needed to place the matrix, axis, legend and sparklines.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixLayout {
    pub margin: Margin,
    pub cell: CellSize,
    /// Inset of the sparkline area inside a cell.
    pub sparkline_margin: Margin,
    /// Horizontal gap between the last column and the legend.
    pub legend_gap: f64,
    pub legend_top: f64,
    pub legend_width: f64,
    pub legend_height: f64,
    /// Vertical position of the year axis line, above the first row.
    pub axis_y: f64,
    pub missing_fill: Rgb,
    pub max_line: Rgb,
    pub min_line: Rgb,
}

impl Default for MatrixLayout {
    fn default() -> Self {
        MatrixLayout {
            margin: Margin {
                top: 42.0,
                right: 120.0,
                bottom: 10.0,
                left: 90.0,
            },
            cell: CellSize {
                width: 78.0,
                height: 58.0,
                pad_x: 14.0,
                pad_y: 14.0,
            },
            sparkline_margin: Margin {
                top: 8.0,
                right: 6.0,
                bottom: 8.0,
                left: 6.0,
            },
            legend_gap: 30.0,
            legend_top: 6.0,
            legend_width: 16.0,
            legend_height: 230.0,
            axis_y: -18.0,
            missing_fill: Rgb::new(0xf3, 0xf4, 0xf6),
            max_line: Rgb::new(0x16, 0xa3, 0x4a),
            min_line: Rgb::new(0x06, 0xb6, 0xd4),
        }
    }
}

impl MatrixLayout {
    fn column_pitch(&self) -> f64 {
        self.cell.width + self.cell.pad_x
    }

    fn row_pitch(&self) -> f64 {
        self.cell.height + self.cell.pad_y
    }

    /// Width of the cell area for `columns` years (0 when there are none).
    pub fn grid_width(&self, columns: usize) -> f64 {
        if columns == 0 {
            return 0.0;
        }
        columns as f64 * self.column_pitch() - self.cell.pad_x
    }

    pub fn grid_height(&self) -> f64 {
        MONTHS_PER_YEAR as f64 * self.row_pitch() - self.cell.pad_y
    }

    /// Total drawing width including margins.
    pub fn width(&self, columns: usize) -> f64 {
        self.margin.left + self.grid_width(columns) + self.margin.right
    }

    pub fn height(&self) -> f64 {
        self.margin.top + self.grid_height() + self.margin.bottom
    }

    /// Top-left corner of the cell in `column` for `month` (1..=12).
    pub fn cell_origin(&self, column: usize, month: u32) -> Point {
        Point {
            x: column as f64 * self.column_pitch(),
            y: month.saturating_sub(1) as f64 * self.row_pitch(),
        }
    }

    /// Horizontal centre of a column, where the year tick sits.
    pub fn column_center(&self, column: usize) -> f64 {
        self.cell_origin(column, 1).x + self.cell.width / 2.0
    }

    /// Size of the sparkline area inside a cell.
    pub fn sparkline_inner(&self) -> (f64, f64) {
        (
            self.cell.width - self.sparkline_margin.left - self.sparkline_margin.right,
            self.cell.height - self.sparkline_margin.top - self.sparkline_margin.bottom,
        )
    }

    /// Top-left corner of the legend bar.
    pub fn legend_origin(&self, columns: usize) -> Point {
        Point {
            x: self.grid_width(columns) + self.legend_gap,
            y: self.legend_top,
        }
    }

    /// The (column, month) whose cell contains `point`, or `None` when the
    /// point falls in a gap or outside the grid.
    pub fn hit_test(&self, point: Point, columns: usize) -> Option<(usize, u32)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.column_pitch()).floor() as usize;
        let row = (point.y / self.row_pitch()).floor() as usize;
        if column >= columns || row >= MONTHS_PER_YEAR as usize {
            return None;
        }
        let local_x = point.x - column as f64 * self.column_pitch();
        let local_y = point.y - row as f64 * self.row_pitch();
        if local_x > self.cell.width || local_y > self.cell.height {
            return None;
        }
        Some((column, row as u32 + 1))
    }
}
