//! visualize: figures for multi-start results, written as SVG.
//!
//! Purpose
//! -------
//! Render the two standard diagnostics of a multi-start run:
//! [`waterfall`] (sorted final values, to judge how often the best optimum
//! was found) and [`parameters`] (where the best starts ended up relative
//! to the bounds).
//!
//! Conventions
//! -----------
//! - Output is always an SVG file at a caller-given path.
//! - Failed and non-finite starts are never drawn; a result with nothing
//!   finite is [`PlotError::NoFiniteResults`].
//! - Backend failures surface as [`PlotError::Backend`].

pub mod errors;
pub mod parameters;
pub mod waterfall;

pub use self::errors::{PlotError, PlotResult};
pub use self::parameters::{ParametersOptions, parameters};
pub use self::waterfall::{WaterfallOptions, WaterfallScale, waterfall};

/// Range of `values` padded by 5% on each side (±1 for a single value).
fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 { 0.05 * span } else { 1.0 };
    (lo - pad, hi + pad)
}

fn validate_size(width: u32, height: u32) -> PlotResult<()> {
    if width == 0 || height == 0 {
        return Err(PlotError::InvalidOptions { reason: "figure size must be non-zero" });
    }
    Ok(())
}
