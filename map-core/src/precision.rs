//! Decimal truncation used to make orbit values comparable.
//!
//! Iterates are compared for exact equality, so every value is cut down to a
//! fixed number of decimal places first. Truncation goes toward negative
//! infinity after scaling (`floor(v * 10^p) / 10^p`), not to the nearest
//! value.

use crate::error::{Error, Result};

/// Largest supported number of decimal places.
///
/// Beyond this, `v * 10^p` for values in `[0, 1]` no longer fits the 53-bit
/// mantissa of an `f64` and truncation stops being meaningful.
pub const MAX_PLACES: i32 = 15;

/// Truncates values to a fixed number of decimal places.
///
/// The scale factor is computed once, so this is cheap to call inside the
/// orbit loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Truncator {
    places: u32,
    factor: f64,
}

impl Truncator {
    /// Creates a truncator keeping `places` decimal places.
    ///
    /// ### Errors
    /// - [`Error::NegativePrecision`] if `places < 0`.
    /// - [`Error::InvalidConfig`] if `places > MAX_PLACES`.
    pub fn new(places: i32) -> Result<Self> {
        if places < 0 {
            return Err(Error::NegativePrecision(places));
        }
        if places > MAX_PLACES {
            return Err(Error::InvalidConfig {
                field: "orbit.precision",
                reason: format!("at most {MAX_PLACES} decimal places are supported, got {places}"),
            });
        }
        let places = places as u32;
        Ok(Self {
            places,
            factor: 10f64.powi(places as i32),
        })
    }

    pub fn places(&self) -> u32 {
        self.places
    }

    /// Truncates `value` to the configured number of places.
    ///
    /// A value that already sits on the decimal grid is returned unchanged,
    /// even when `value * 10^p` lands a rounding error below the grid point,
    /// so truncating twice gives the same result as truncating once.
    ///
    /// Non-finite or huge inputs saturate through the integer cast instead
    /// of panicking.
    #[inline]
    pub fn truncate(&self, value: f64) -> f64 {
        let scaled = value * self.factor;
        let nearest = scaled.round();
        let units = if (scaled - nearest).abs() <= scaled.abs() * f64::EPSILON * 4.0 {
            nearest
        } else {
            scaled.floor()
        };
        (units as i64) as f64 / self.factor
    }
}

/// Truncates `value` to `places` decimal places.
///
/// Convenience wrapper around [`Truncator`] for one-off use (tick labels,
/// tests). The orbit loop builds a [`Truncator`] once instead.
///
/// ### Errors
/// Same as [`Truncator::new`].
pub fn round_down(value: f64, places: i32) -> Result<f64> {
    Ok(Truncator::new(places)?.truncate(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_negative_infinity() {
        assert_eq!(round_down(0.123456789, 8).unwrap(), 0.12345678);
        assert_eq!(round_down(0.987654321987, 4).unwrap(), 0.9876);
        assert_eq!(round_down(2.75, 1).unwrap(), 2.7);
        assert_eq!(round_down(-0.25, 1).unwrap(), -0.3);
    }

    #[test]
    fn drops_tail_above_one() {
        assert_eq!(round_down(1.0000001, 4).unwrap(), 1.0);
    }

    #[test]
    fn zero_places_keeps_integer_part() {
        assert_eq!(round_down(0.999, 0).unwrap(), 0.0);
        assert_eq!(round_down(1.0000001, 0).unwrap(), 1.0);
    }

    #[test]
    fn grid_values_are_left_alone() {
        // 0.3 * 10 is exactly 3, but several 8-place values scale to just
        // below their integer and would otherwise lose a digit.
        for v in [0.5, 0.3, 0.79945549, 0.51304451, 0.12345678] {
            assert_eq!(round_down(v, 8).unwrap(), v);
        }
    }

    #[test]
    fn truncation_is_idempotent() {
        let t = Truncator::new(8).unwrap();
        let mut v = 0.0;
        while v < 1.0 {
            let once = t.truncate(v);
            assert_eq!(t.truncate(once), once, "not idempotent at {v}");
            v += 0.000_123_456_7;
        }
    }

    #[test]
    fn negative_precision_is_rejected() {
        assert!(matches!(
            round_down(0.5, -1),
            Err(Error::NegativePrecision(-1))
        ));
    }

    #[test]
    fn excessive_precision_is_rejected() {
        assert!(matches!(
            Truncator::new(MAX_PLACES + 1),
            Err(Error::InvalidConfig { .. })
        ));
        assert_eq!(Truncator::new(MAX_PLACES).unwrap().places(), 15);
    }

    #[test]
    fn infinite_input_saturates() {
        let t = Truncator::new(8).unwrap();
        assert!(t.truncate(f64::NEG_INFINITY).is_finite());
        assert!(t.truncate(f64::INFINITY).is_finite());
    }
}
