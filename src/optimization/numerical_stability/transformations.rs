//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used to map
//! an unconstrained optimizer coordinate onto a bounded interval. The
//! functions here follow guarded strategies similar to those in major ML
//! libraries (e.g. PyTorch, TensorFlow), using explicit cutoffs
//! (`|x| > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`BOUND_MARGIN`]: relative distance kept from a finite bound when
//!   pulling a point back into the open interval (default 1e-10).
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`]: stable `1 / (1 + exp(-x))`, mapping ℝ → (0, 1).
//! - [`safe_logit(p)`]: inverse of the logistic on `(0, 1)`.

/// Relative margin kept between a transformed point and a finite bound.
///
/// Points on or beyond a bound have no finite preimage under the logistic
/// or softplus maps. They are moved inside by `BOUND_MARGIN` times the
/// interval width (or times `max(1, |bound|)` for half-bounded
/// coordinates) before inversion.
pub const BOUND_MARGIN: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// - For sufficiently large `x`, `ln(exp(x) - 1) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// `x` must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments, so neither branch can
/// overflow. `σ` is also the derivative of [`safe_softplus`].
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse logistic `logit(p) = ln(p / (1 - p))` on `(0, 1)`.
///
/// Uses `ln_1p` on the side closer to 1 to keep precision for `p`
/// near either end of the interval.
pub fn safe_logit(p: f64) -> f64 {
    if p <= 0.5 { p.ln() - (-p).ln_1p() } else { -((1.0 - p).ln() - (p - 1.0).ln_1p()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naïve formulas on a safe grid.
    // - Inverse pairs (softplus/softplus_inv, logistic/logit).
    // - Tail behavior without overflow.
    // -------------------------------------------------------------------------

    const GRID: [f64; 7] = [-8.0, -2.5, -0.3, 0.0, 0.7, 3.0, 9.0];

    #[test]
    // Purpose
    // -------
    // Guarded transforms agree with their naïve definitions where the
    // naïve forms are well conditioned.
    //
    // Given
    // -----
    // - A grid of moderate inputs.
    //
    // Expect
    // ------
    // - softplus and logistic match the textbook formulas to 1e-12.
    fn transforms_match_naive_formulas_on_safe_grid() {
        for &x in GRID.iter() {
            assert_relative_eq!(safe_softplus(x), (1.0 + x.exp()).ln(), epsilon = 1e-12);
            assert_relative_eq!(safe_logistic(x), 1.0 / (1.0 + (-x).exp()), epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Each inverse undoes its forward transform.
    //
    // Given
    // -----
    // - The same grid of inputs.
    //
    // Expect
    // ------
    // - softplus_inv(softplus(x)) == x and logit(logistic(x)) == x up to 1e-9.
    fn inverses_round_trip_on_safe_grid() {
        for &x in GRID.iter() {
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
            assert_relative_eq!(safe_logit(safe_logistic(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Extreme inputs stay finite and land on the expected asymptotes.
    //
    // Given
    // -----
    // - x = ±800, far beyond where `exp` overflows.
    //
    // Expect
    // ------
    // - logistic saturates to 0 / 1, softplus to 0 / x, all finite.
    fn tails_do_not_overflow() {
        assert_eq!(safe_logistic(800.0), 1.0);
        assert_eq!(safe_logistic(-800.0), 0.0);
        assert_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_softplus(-800.0).is_finite());
        assert!(safe_softplus(-800.0) >= 0.0);
    }
}
