//! Logistic map bifurcation diagram: sampling core.
//!
//! Main components:
//! - [`config`]: startup parameters for the sweep, the orbit and the display.
//! - [`precision`]: decimal truncation of iterates.
//! - [`orbit`]: per-`r` iteration and attractor detection.
//! - [`attractor`]: attractor values and their classification.
//! - [`projection`]: mapping `(r, x)` into plot coordinates.
//! - [`sampler`]: the `r` sweep producing a [`diagram::Diagram`].
//! - [`diagram`]: the immutable result and axis ticks.
//! - [`error`]: crate error type.
//! - [`types`]: shared type aliases.

pub mod attractor;
pub mod config;
pub mod diagram;
pub mod error;
pub mod orbit;
pub mod precision;
pub mod projection;
pub mod sampler;
pub mod types;

pub use config::Config;
pub use diagram::Diagram;
pub use error::{Error, Result};
pub use sampler::sample;
