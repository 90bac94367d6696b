//! Continuous linear scales.
//!
//! Tick and nice-bound computation uses the usual 1, 2, 5 x 10^k step
//! selection so that axis labels land on round numbers.

use serde::{Deserialize, Serialize};
use tmx_utils::numbers::round_half_up;

/// Tick count used when niceing a scale without an explicit count.
pub const NICE_TICK_COUNT: usize = 10;

/// Step-size thresholds: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// Maps a continuous domain linearly onto a continuous range.
///
/// A degenerate domain (both ends equal) maps every input to the middle of
/// the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale {
            domain,
            range,
            clamp: false,
        }
    }

    /// Restrict outputs to the range by clamping inputs to the domain.
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Position of `x` within the domain, 0 at the first end and 1 at the
    /// second.
    pub fn normalize(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        if span == 0.0 || span.is_nan() {
            return 0.5;
        }
        let t = (x - d0) / span;
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(x) * (r1 - r0)
    }

    /// Extend the domain outward to round values suitable for `count` ticks.
    ///
    /// Leaves degenerate or non-finite domains untouched.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut previous_step: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous_step == Some(step) {
                self.domain = if reversed { (stop, start) } else { (start, stop) };
                return self;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }
        self
    }

    /// Round tick values covering the domain, approximately `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Returns (first index, last index, increment). A negative increment means
/// ticks are `index / -increment`, which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inverse);
        i2 = round_half_up(stop * inverse);
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        increment = -inverse;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        increment = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, increment)
}

/// The tick step for `[start, stop]`, or 0 when no step exists (empty or
/// degenerate interval, zero count).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !(stop > start) || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    tick_spec(start, stop, count as f64).2
}

/// Round values between `start` and `stop` inclusive, in the order given.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reversed = stop < start;
    let (low, high) = if reversed { (stop, start) } else { (start, stop) };
    let (i1, i2, increment) = tick_spec(low, high, count as f64);
    if i2 < i1 {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let index = i1 + i as f64;
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect();
    if reversed {
        values.reverse();
    }
    values
}

#[cfg(test)]
mod tests {
    use super::{tick_increment, ticks, LinearScale};

    #[test]
    fn test_apply_and_invert_range() {
        let scale = LinearScale::new((0.0, 40.0), (0.0, 230.0));
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(20.0), 115.0);
        assert_eq!(scale.apply(40.0), 230.0);

        let inverted = LinearScale::new((10.0, 30.0), (42.0, 0.0));
        assert_eq!(inverted.apply(10.0), 42.0);
        assert_eq!(inverted.apply(30.0), 0.0);
    }

    #[test]
    fn test_clamp() {
        let scale = LinearScale::new((0.0, 40.0), (0.0, 1.0));
        assert_eq!(scale.apply(50.0), 1.25);
        let clamped = scale.clamped();
        assert_eq!(clamped.apply(50.0), 1.0);
        assert_eq!(clamped.apply(-10.0), 0.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_middle() {
        let scale = LinearScale::new((1.0, 1.0), (0.0, 66.0));
        assert_eq!(scale.apply(1.0), 33.0);
        assert_eq!(scale.apply(7.0), 33.0);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(0.0, 40.0, 5), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(40.0, 0.0, 5), vec![40.0, 30.0, 20.0, 10.0, 0.0]);
        assert_eq!(ticks(-3.0, 7.0, 10), (-3..=7).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(5.0, 5.0, 5), vec![5.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_tick_increment() {
        assert_eq!(tick_increment(0.0, 40.0, 5), 10.0);
        assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
        // fractional steps come back as negative inverses
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
        assert_eq!(tick_increment(3.0, 3.0, 10), 0.0);
    }

    #[test]
    fn test_nice_rounds_outward() {
        let scale = LinearScale::new((18.3, 32.7), (42.0, 0.0)).nice(10);
        assert_eq!(scale.domain(), (18.0, 34.0));
        let scale = LinearScale::new((20.0, 31.0), (42.0, 0.0)).nice(10);
        assert_eq!(scale.domain(), (20.0, 31.0));
        let scale = LinearScale::new((0.13, 0.87), (0.0, 1.0)).nice(10);
        assert_eq!(scale.domain(), (0.1, 0.9));
    }

    #[test]
    fn test_nice_keeps_reversed_orientation() {
        let scale = LinearScale::new((32.7, 18.3), (0.0, 1.0)).nice(10);
        assert_eq!(scale.domain(), (34.0, 18.0));
    }

    #[test]
    fn test_nice_degenerate_is_noop() {
        let scale = LinearScale::new((12.5, 12.5), (42.0, 0.0)).nice(10);
        assert_eq!(scale.domain(), (12.5, 12.5));
    }
}
