//! Linear mapping from diagram space `(r, x)` to integer plot coordinates.

use glam::{DVec2, IVec2};

use crate::config::{DisplayConfig, SweepConfig};
use crate::types::ScreenPoint;

/// Maps `n` from `[first_bound, second_bound]` onto `[third_bound, fourth_bound]`.
///
/// `first_bound` lands on `third_bound` and `second_bound` on
/// `fourth_bound`; values outside the source range extrapolate linearly.
#[inline]
pub fn translate_point(
    n: f64,
    first_bound: f64,
    second_bound: f64,
    third_bound: f64,
    fourth_bound: f64,
) -> f64 {
    let ratio = (n - first_bound) / (second_bound - first_bound);
    third_bound + (fourth_bound - third_bound) * ratio
}

/// Projects `(r, value)` pairs into the plot rectangle.
///
/// `r` spans `[min, max]` horizontally and the value spans `[0, 1]`
/// vertically. Output coordinates are rounded to the nearest pixel with the
/// origin at the bottom-left of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    r_min: f64,
    r_max: f64,
    plot_size: DVec2,
}

impl Projection {
    pub fn new(sweep: &SweepConfig, display: &DisplayConfig) -> Self {
        Self {
            r_min: sweep.min,
            r_max: sweep.max,
            plot_size: DVec2::new(display.plot_width() as f64, display.plot_height() as f64),
        }
    }

    /// Plot size in pixels.
    pub fn plot_size(&self) -> IVec2 {
        self.plot_size.as_ivec2()
    }

    pub fn project(&self, r: f64, value: f64) -> ScreenPoint {
        let x = translate_point(r, self.r_min, self.r_max, 0.0, self.plot_size.x);
        let y = translate_point(value, 0.0, 1.0, 0.0, self.plot_size.y);
        DVec2::new(x, y).round().as_ivec2()
    }
}
