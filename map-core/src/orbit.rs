//! Per-`r` orbit iteration and attractor detection.
//!
//! The orbit starts at `x0` and is advanced with the logistic equation, each
//! iterate truncated to a fixed number of decimal places. Iteration stops as
//! soon as one of these holds:
//!
//! 1. The new value is within the boundary tolerance of `0` (or the orbit
//!    left `[0, 1]`): the attractor is `{0.0}`.
//! 2. The new value is within the boundary tolerance of `1`: the attractor is
//!    `{1.0}`.
//! 3. The new value was already visited: the attractor is the visited orbit
//!    from that earlier position onward.
//! 4. The step cap is exceeded: the attractor is the whole visited orbit.
//!
//! Recurrence is exact equality of truncated values, so two iterates that
//! differ in the last kept digit are different points. Slowly converging
//! orbits therefore often end in case 4.

use std::collections::HashMap;

use crate::{
    attractor::Attractor,
    config::OrbitConfig,
    error::Result,
    precision::Truncator,
};

/// One step of the logistic map, `r * x * (1 - x)`.
#[inline]
pub fn logistic(r: f64, x: f64) -> f64 {
    r * x * (1.0 - x)
}

/// Finds attractors for a fixed `x0`, precision and step cap.
///
/// Construction validates the precision once; [`OrbitIterator::attractor`]
/// is then infallible and can be called for every sampled `r`.
#[derive(Clone, Debug)]
pub struct OrbitIterator {
    x0: f64,
    truncator: Truncator,
    max_iterations: usize,
    tolerance: f64,
}

impl OrbitIterator {
    /// ### Errors
    /// Fails if `cfg.precision` is negative or too large for an `f64`.
    pub fn new(cfg: &OrbitConfig) -> Result<Self> {
        Ok(Self {
            x0: cfg.x0,
            truncator: Truncator::new(cfg.precision)?,
            max_iterations: cfg.max_iterations,
            tolerance: cfg.boundary_tolerance,
        })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Iterates the map for `r` and returns its attractor.
    ///
    /// ### Returns
    /// An [`Attractor`] with at least one value, all in `[0, 1]`.
    pub fn attractor(&self, r: f64) -> Attractor {
        let mut visited = Vec::with_capacity(64);
        // Exact bit pattern of each truncated value -> its position in `visited`.
        let mut seen: HashMap<u64, usize> = HashMap::with_capacity(64);

        visited.push(self.x0);
        seen.insert(self.x0.to_bits(), 0);

        let mut last = self.x0;
        for _ in 0..=self.max_iterations {
            let next = self.truncator.truncate(logistic(r, last));

            // Anything above 1 goes negative on the next step, so an escaped
            // orbit is an extinct population as well.
            if next < self.tolerance || next > 1.0 + self.tolerance {
                return Attractor::extinct(r);
            }
            if (next - 1.0).abs() < self.tolerance {
                return Attractor::saturated(r);
            }
            if let Some(&start) = seen.get(&next.to_bits()) {
                return Attractor::cycle(r, visited.split_off(start));
            }

            seen.insert(next.to_bits(), visited.len());
            visited.push(next);
            last = next;
        }

        Attractor::unresolved(r, visited)
    }
}
