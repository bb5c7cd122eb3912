//! Startup configuration for the sweep, the orbit iterator and the display.
//!
//! All values are fixed once the program starts. They can come from
//! [`Config::default`], a TOML file ([`Config::load`]) or be overridden by
//! the caller before [`Config::validate`] is run.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::precision::MAX_PLACES;

/// Largest number of `r` samples a sweep may have.
pub const MAX_SAMPLES: u64 = 10_000_000;

/// Largest window width or height in pixels.
pub const MAX_WINDOW_SIDE: u32 = 8192;

/// Range and density of the `r` sweep.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Left bound of the swept `r` range (inclusive).
    pub min: f64,
    /// Right bound of the swept `r` range (inclusive).
    pub max: f64,
    /// Samples per unit of `r`; the sweep step is `1 / accuracy`.
    pub accuracy: f64,
}

/// Parameters of the per-`r` orbit iteration.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbitConfig {
    /// Starting population, strictly inside `(0, 1)`.
    pub x0: f64,
    /// Decimal places kept when truncating iterates.
    pub precision: i32,
    /// Step cap after which the orbit is returned as-is.
    pub max_iterations: usize,
    /// Distance to 0 or 1 below which the orbit counts as collapsed.
    pub boundary_tolerance: f64,
}

/// Window geometry and annotation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Horizontal space not used by the plot.
    pub width_offset: u32,
    /// Vertical space below the plot, used for the tick labels.
    pub height_offset: u32,
    /// Number of `r` tick labels along the bottom axis.
    pub num_ticks: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sweep: SweepConfig,
    pub orbit: OrbitConfig,
    pub display: DisplayConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 4.4,
            accuracy: 1000.0,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            x0: 0.5,
            precision: 8,
            max_iterations: 10_000,
            boundary_tolerance: 1e-3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 800,
            width_offset: 50,
            height_offset: 100,
            num_ticks: 22,
        }
    }
}

impl DisplayConfig {
    /// Width of the plot area in pixels.
    pub fn plot_width(&self) -> u32 {
        self.width.saturating_sub(self.width_offset)
    }

    /// Height of the plot area in pixels.
    pub fn plot_height(&self) -> u32 {
        self.height.saturating_sub(self.height_offset)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

impl Config {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// The result is not validated; call [`Config::validate`] after applying
    /// any overrides.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Checks every field for a usable value.
    ///
    /// ### Errors
    /// [`Error::InvalidConfig`] naming the first offending field, or
    /// [`Error::NegativePrecision`] for a negative precision.
    pub fn validate(&self) -> Result<()> {
        let s = &self.sweep;
        finite("sweep.min", s.min)?;
        finite("sweep.max", s.max)?;
        finite("sweep.accuracy", s.accuracy)?;
        if s.min >= s.max {
            return Err(invalid(
                "sweep.max",
                format!("must be greater than sweep.min ({} >= {})", s.min, s.max),
            ));
        }
        if s.accuracy <= 0.0 {
            return Err(invalid("sweep.accuracy", "must be positive"));
        }
        let samples = (s.max - s.min) * s.accuracy;
        if samples > MAX_SAMPLES as f64 {
            return Err(invalid(
                "sweep.accuracy",
                format!("(max - min) * accuracy = {samples:e} exceeds {MAX_SAMPLES} samples"),
            ));
        }

        let o = &self.orbit;
        finite("orbit.x0", o.x0)?;
        finite("orbit.boundary_tolerance", o.boundary_tolerance)?;
        if o.x0 <= 0.0 || o.x0 >= 1.0 {
            return Err(invalid(
                "orbit.x0",
                format!("must lie strictly between 0 and 1, got {}", o.x0),
            ));
        }
        if o.precision < 0 {
            return Err(Error::NegativePrecision(o.precision));
        }
        if o.precision > MAX_PLACES {
            return Err(invalid(
                "orbit.precision",
                format!("at most {MAX_PLACES} decimal places are supported"),
            ));
        }
        if o.max_iterations == 0 {
            return Err(invalid("orbit.max_iterations", "must be at least 1"));
        }
        if o.boundary_tolerance <= 0.0 || o.boundary_tolerance >= 0.5 {
            return Err(invalid(
                "orbit.boundary_tolerance",
                "must lie strictly between 0 and 0.5",
            ));
        }

        let d = &self.display;
        if d.width > MAX_WINDOW_SIDE {
            return Err(invalid(
                "display.width",
                format!("at most {MAX_WINDOW_SIDE} pixels"),
            ));
        }
        if d.height > MAX_WINDOW_SIDE {
            return Err(invalid(
                "display.height",
                format!("at most {MAX_WINDOW_SIDE} pixels"),
            ));
        }
        if d.width_offset >= d.width {
            return Err(invalid("display.width_offset", "must be smaller than display.width"));
        }
        if d.height_offset >= d.height {
            return Err(invalid(
                "display.height_offset",
                "must be smaller than display.height",
            ));
        }
        if d.num_ticks == 0 {
            return Err(invalid("display.num_ticks", "must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: Error) -> &'static str {
        match err {
            Error::InvalidConfig { field, .. } => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn default_is_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.display.plot_width(), 1050);
        assert_eq!(cfg.display.plot_height(), 700);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str(
            r#"
[sweep]
min = 2.5
max = 4.0

[orbit]
max_iterations = 500
"#,
        )
        .unwrap();

        assert_eq!(cfg.sweep.min, 2.5);
        assert_eq!(cfg.sweep.max, 4.0);
        assert_eq!(cfg.sweep.accuracy, 1000.0);
        assert_eq!(cfg.orbit.max_iterations, 500);
        assert_eq!(cfg.orbit.x0, 0.5);
        assert_eq!(cfg.display, DisplayConfig::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn bundled_example_file_parses() {
        let cfg = Config::from_toml_str(include_str!("../../logistic.toml")).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.sweep.min, 2.8);
        assert_eq!(cfg.display.num_ticks, 12);
        assert_eq!(cfg.orbit, OrbitConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[sweep]\nstep = 0.1\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        match err {
            Error::ConfigRead { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.toml"))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut cfg = Config::default();
        cfg.sweep.min = 3.0;
        cfg.sweep.max = 3.0;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "sweep.max");
    }

    #[test]
    fn bad_sweep_values_are_rejected() {
        let mut cfg = Config::default();
        cfg.sweep.accuracy = 0.0;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "sweep.accuracy");

        let mut cfg = Config::default();
        cfg.sweep.max = f64::INFINITY;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "sweep.max");
    }

    #[test]
    fn oversized_sweep_is_rejected() {
        for accuracy in [1e20, 1e8] {
            let mut cfg = Config::default();
            cfg.sweep.accuracy = accuracy;
            assert_eq!(field_of(cfg.validate().unwrap_err()), "sweep.accuracy");
        }

        // Exactly at the limit is still fine.
        let mut cfg = Config::default();
        cfg.sweep.min = 0.0;
        cfg.sweep.max = 1.0;
        cfg.sweep.accuracy = MAX_SAMPLES as f64;
        cfg.validate().unwrap();
    }

    #[test]
    fn bad_orbit_values_are_rejected() {
        for x0 in [0.0, 1.0, -0.2, 1.5] {
            let mut cfg = Config::default();
            cfg.orbit.x0 = x0;
            assert_eq!(field_of(cfg.validate().unwrap_err()), "orbit.x0");
        }

        let mut cfg = Config::default();
        cfg.orbit.max_iterations = 0;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "orbit.max_iterations");

        let mut cfg = Config::default();
        cfg.orbit.boundary_tolerance = 0.0;
        assert_eq!(
            field_of(cfg.validate().unwrap_err()),
            "orbit.boundary_tolerance"
        );

        let mut cfg = Config::default();
        cfg.orbit.precision = 16;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "orbit.precision");
    }

    #[test]
    fn negative_precision_has_its_own_error() {
        let mut cfg = Config::default();
        cfg.orbit.precision = -3;
        assert!(matches!(
            cfg.validate(),
            Err(Error::NegativePrecision(-3))
        ));
    }

    #[test]
    fn bad_display_values_are_rejected() {
        let mut cfg = Config::default();
        cfg.display.width_offset = cfg.display.width;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "display.width_offset");

        let mut cfg = Config::default();
        cfg.display.height_offset = 900;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "display.height_offset");

        let mut cfg = Config::default();
        cfg.display.num_ticks = 0;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "display.num_ticks");

        let mut cfg = Config::default();
        cfg.display.width = 100_000;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "display.width");

        let mut cfg = Config::default();
        cfg.display.height = 100_000;
        assert_eq!(field_of(cfg.validate().unwrap_err()), "display.height");
    }
}
