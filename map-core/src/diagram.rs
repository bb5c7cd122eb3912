//! The finished bifurcation diagram handed to the renderer.

use std::fmt;

use crate::{
    attractor::{Attractor, AttractorKind},
    config::Config,
    error::Result,
    precision::round_down,
    types::ScreenPoint,
};

/// Counts collected while sweeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub samples: usize,
    pub extinct: usize,
    pub saturated: usize,
    pub cycles: usize,
    pub unresolved: usize,
    pub longest_period: usize,
    pub points: usize,
}

impl SweepStats {
    /// Accounts for one sampled attractor.
    pub fn record(&mut self, attractor: &Attractor) {
        self.samples += 1;
        self.points += attractor.len();
        match attractor.kind {
            AttractorKind::Extinct => self.extinct += 1,
            AttractorKind::Saturated => self.saturated += 1,
            AttractorKind::Cycle { period } => {
                self.cycles += 1;
                self.longest_period = self.longest_period.max(period);
            }
            AttractorKind::Unresolved => self.unresolved += 1,
        }
    }
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {} points ({} extinct, {} saturated, {} cycles up to period {}, {} unresolved)",
            self.samples,
            self.points,
            self.extinct,
            self.saturated,
            self.cycles,
            self.longest_period,
            self.unresolved
        )
    }
}

/// Evenly spaced `r` values for the bottom axis, truncated to one decimal.
///
/// Tick `i` sits at `min + i * (max - min) / num_ticks`, so the last tick is
/// one step short of `max`.
pub fn tick_labels(cfg: &Config) -> Result<Vec<f64>> {
    let s = &cfg.sweep;
    let n = cfg.display.num_ticks;
    (0..n)
        .map(|i| round_down(s.min + i as f64 * (s.max - s.min) / n as f64, 1))
        .collect()
}

/// Immutable result of a sweep: plot points, axis ticks and stats.
#[derive(Clone, Debug)]
pub struct Diagram {
    x0: f64,
    points: Vec<ScreenPoint>,
    ticks: Vec<f64>,
    stats: SweepStats,
}

impl Diagram {
    pub(crate) fn new(x0: f64, points: Vec<ScreenPoint>, ticks: Vec<f64>, stats: SweepStats) -> Self {
        Self {
            x0,
            points,
            ticks,
            stats,
        }
    }

    /// Starting population the diagram was computed from.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Plot points in sweep order: `r` ascending, then attractor order.
    pub fn points(&self) -> &[ScreenPoint] {
        &self.points
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }
}
