//! A grid together with the visual mappings derived from it.

use crate::color::{ColorScale, Rgb};
use crate::layout::MatrixLayout;
use crate::legend::Legend;
use crate::sparkline::{sparkline_path, Point, SparklinePath};
use tmx_core::mode::Mode;
use tmx_core::month::{MonthCell, MonthKey};
use tmx_data::grid::Grid;

/// Everything the renderer and the hover handler need for one grid.
///
/// Scales, the legend and every sparkline are computed once in
/// [`MatrixView::new`]. Switching modes does not rebuild anything; only the
/// fill lookup takes the mode.
#[derive(Debug, Clone)]
pub struct MatrixView {
    grid: Grid,
    layout: MatrixLayout,
    color: ColorScale,
    legend: Legend,
    /// Parallel to `grid.cells()`.
    sparklines: Vec<Option<SparklinePath>>,
}

impl MatrixView {
    pub fn new(grid: Grid, layout: MatrixLayout) -> Self {
        let color = ColorScale::default();
        let legend = Legend::new(color, layout.legend_height);
        let (inner_width, inner_height) = layout.sparkline_inner();
        let sparklines = grid
            .cells()
            .iter()
            .map(|cell| sparkline_path(cell, inner_width, inner_height))
            .collect();
        log::debug!(
            "view: {} years, {} cells, {} missing",
            grid.years.len(),
            grid.cells().len(),
            grid.missing_count()
        );
        MatrixView {
            grid,
            layout,
            color,
            legend,
            sparklines,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &MatrixLayout {
        &self.layout
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.color
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn width(&self) -> f64 {
        self.layout.width(self.grid.years.len())
    }

    pub fn height(&self) -> f64 {
        self.layout.height()
    }

    pub fn grid_width(&self) -> f64 {
        self.layout.grid_width(self.grid.years.len())
    }

    /// Cell background under `mode`. Missing cells get the neutral fill.
    pub fn fill_for(&self, cell: &MonthCell, mode: Mode) -> Rgb {
        if cell.missing {
            return self.layout.missing_fill;
        }
        cell.display_value(mode)
            .map(|value| self.color.color_for(value))
            .unwrap_or(self.layout.missing_fill)
    }

    pub fn sparkline(&self, key: MonthKey) -> Option<&SparklinePath> {
        let index = self.grid.index_of(key)?;
        self.sparklines.get(index)?.as_ref()
    }

    /// Top-left corner of a cell relative to the grid origin.
    pub fn cell_origin(&self, key: MonthKey) -> Option<Point> {
        let column = self.grid.column(key.year)?;
        Some(self.layout.cell_origin(column, key.month))
    }

    /// The cell under a point given relative to the grid origin.
    pub fn cell_at(&self, point: Point) -> Option<&MonthCell> {
        let (column, month) = self.layout.hit_test(point, self.grid.years.len())?;
        let year = *self.grid.years.get(column)?;
        self.grid.get(MonthKey::new(year, month)?)
    }

    /// Cells paired with their sparklines, in grid order.
    pub fn cells(&self) -> impl Iterator<Item = (&MonthCell, Option<&SparklinePath>)> {
        self.grid
            .cells()
            .iter()
            .zip(self.sparklines.iter().map(Option::as_ref))
    }
}
