//! Vertical gradient legend for the temperature color scale.
//!
//! The gradient is a rendering of [`ColorScale`] itself: 21 evenly spaced
//! samples of the same function that fills the cells, so the legend and the
//! cells cannot disagree.

use crate::color::{ColorScale, Rgb};
use crate::scale::LinearScale;
use serde::Serialize;

/// Number of gradient stops, 0% to 100% in 5% steps.
pub const LEGEND_STOP_COUNT: usize = 21;

/// Default number of labelled ticks along the bar.
pub const LEGEND_TICK_COUNT: usize = 5;

/// One `<stop>` of the legend gradient. `offset` runs 0..=1 from the top of
/// the bar (cold end) to the bottom (hot end).
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub value: f64,
    pub color: Rgb,
}

/// A labelled tick, `offset` pixels down from the top of the bar.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct LegendTick {
    pub value: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    scale: ColorScale,
    height: f64,
}

impl Legend {
    pub fn new(scale: ColorScale, height: f64) -> Self {
        Legend { scale, height }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn stops(&self) -> Vec<GradientStop> {
        let (low, high) = self.domain();
        (0..LEGEND_STOP_COUNT)
            .map(|i| {
                let offset = i as f64 / (LEGEND_STOP_COUNT - 1) as f64;
                let value = low + offset * (high - low);
                GradientStop {
                    offset,
                    value,
                    color: self.scale.color_for(value),
                }
            })
            .collect()
    }

    /// Round-valued ticks over the domain, placed linearly along the bar.
    pub fn ticks(&self, count: usize) -> Vec<LegendTick> {
        let axis = LinearScale::new(self.domain(), (0.0, self.height));
        axis.ticks(count)
            .into_iter()
            .map(|value| LegendTick {
                value,
                offset: axis.apply(value),
            })
            .collect()
    }

    /// The color a renderer shows at `offset` (0..=1) along the gradient,
    /// blending linearly between neighbouring stops.
    pub fn color_at_offset(&self, offset: f64) -> Rgb {
        let stops = self.stops();
        let scaled = offset.clamp(0.0, 1.0) * (LEGEND_STOP_COUNT - 1) as f64;
        let lower = (scaled.floor() as usize).min(LEGEND_STOP_COUNT - 2);
        let fraction = scaled - lower as f64;
        let (a, b) = (stops[lower].color, stops[lower + 1].color);
        let mix = |x: u8, y: u8| {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * fraction).round() as u8
        };
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}
