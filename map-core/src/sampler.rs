//! Sweeps `r` over the configured range and turns every attractor into plot
//! points.
//!
//! The sweep is driven by an integer [`SampleIndex`]; sample `i` uses
//! `r = min + i / accuracy`, so sample positions are exact and reproducible
//! regardless of how many steps came before. Both bounds are included when
//! `max` falls on the sampling grid.

use tracing::{debug, info, warn};

use crate::{
    attractor::Attractor,
    config::{Config, SweepConfig},
    diagram::{Diagram, SweepStats, tick_labels},
    error::Result,
    orbit::OrbitIterator,
    projection::Projection,
    types::{SampleIndex, ScreenPoint},
};

/// Point count above which sampling and drawing get noticeably slow.
pub const POINT_BUDGET: usize = 500_000;

/// Slack when deciding whether `max` lies on the sampling grid.
const GRID_EPS: f64 = 1e-9;

/// The sampled `r` positions of a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    min: f64,
    accuracy: f64,
    last: SampleIndex,
}

impl Sweep {
    pub fn new(cfg: &SweepConfig) -> Self {
        let span = (cfg.max - cfg.min) * cfg.accuracy;
        Self {
            min: cfg.min,
            accuracy: cfg.accuracy,
            last: (span + GRID_EPS).floor().max(0.0) as SampleIndex,
        }
    }

    /// Number of samples, both bounds included.
    ///
    /// Saturates at `usize::MAX` for a sweep that was never validated.
    pub fn len(&self) -> usize {
        usize::try_from(self.last).map_or(usize::MAX, |last| last.saturating_add(1))
    }

    /// A sweep always holds at least the `min` sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn r_at(&self, index: SampleIndex) -> f64 {
        self.min + index as f64 / self.accuracy
    }

    /// Sampled `r` values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.last).map(|i| self.r_at(i))
    }
}

/// Runs the orbit iterator for every sampled `r`, in ascending order.
///
/// ### Errors
/// Any validation error of `cfg`.
pub fn attractors(cfg: &Config) -> Result<Vec<Attractor>> {
    cfg.validate()?;
    let orbit = OrbitIterator::new(&cfg.orbit)?;
    let sweep = Sweep::new(&cfg.sweep);
    Ok(sweep.values().map(|r| orbit.attractor(r)).collect())
}

/// Computes the whole bifurcation diagram for `cfg`.
///
/// This is a single sequential pass. The returned [`Diagram`] is complete,
/// so a renderer can take it as-is and never observe a partial sweep.
///
/// ### Errors
/// Any validation error of `cfg`.
pub fn sample(cfg: &Config) -> Result<Diagram> {
    cfg.validate()?;

    let orbit = OrbitIterator::new(&cfg.orbit)?;
    let sweep = Sweep::new(&cfg.sweep);
    let projection = Projection::new(&cfg.sweep, &cfg.display);
    let ticks = tick_labels(cfg)?;

    info!(
        samples = sweep.len(),
        min = cfg.sweep.min,
        max = cfg.sweep.max,
        accuracy = cfg.sweep.accuracy,
        "sampling logistic map"
    );

    let mut stats = SweepStats::default();
    let mut points: Vec<ScreenPoint> = Vec::with_capacity(sweep.len());

    for r in sweep.values() {
        let attractor = orbit.attractor(r);
        stats.record(&attractor);
        points.extend(attractor.values.iter().map(|&v| projection.project(r, v)));
    }

    debug!(?stats, "sweep finished");
    info!("{stats}");
    if stats.points > POINT_BUDGET {
        warn!(
            points = stats.points,
            budget = POINT_BUDGET,
            "diagram is very large; lower sweep.accuracy or narrow the r range"
        );
    }

    Ok(Diagram::new(orbit.x0(), points, ticks, stats))
}
