//! local::finite_diff: finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Provide derivative approximations for objectives that do not supply
//! analytic ones, so the rest of the optimizer never talks to the
//! `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`]: central differences first, forward differences when
//!   the central pass hit an evaluation error or produced a non-finite
//!   entry.
//! - [`run_fd_diff`]: forward differences with error capture and
//!   validation.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   forward-difference fallback, symmetrized in place.
//! - [`hessian_from_values`]: second differences of the value alone, for
//!   objectives without any analytic derivative.
//!
//! Conventions
//! -----------
//! - The `finitediff` closures must return plain values, so evaluation
//!   errors are parked in a shared `RefCell<Option<Error>>` while the
//!   closure returns `NaN`; the helpers turn the parked error back into an
//!   `OptError` afterwards.
//! - Differences are taken in whatever coordinates the caller passes; the
//!   adapter differentiates the cost in unconstrained coordinates, while
//!   result Hessians are taken in box coordinates.
use crate::optimization::{
    errors::OptResult,
    local::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Gradient of `func` at `theta` by finite differences.
///
/// `func` must write any evaluation error into `closure_err` and return
/// `NaN`. The central pass is tried first; if it captured an error or the
/// result fails [`validate_grad`], the forward pass of [`run_fd_diff`]
/// decides the outcome.
///
/// # Errors
/// The captured evaluation error, or a validation error of the forward
/// gradient.
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let central = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, func, closure_err)
}

/// Forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, runs `forward_diff`, surfaces any captured error,
/// then validates the gradient against `theta.len()`.
///
/// # Errors
/// - The error captured in `closure_err`, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
///
/// # Examples
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::array;
/// # use rust_posterior::optimization::local::finite_diff::run_fd_diff;
/// let theta = array![0.0_f64, 1.0];
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
/// let f = |x: &ndarray::Array1<f64>| x.dot(x);
///
/// let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), theta.len());
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of a gradient map, validated and symmetric.
///
/// Central differences are attempted first; a central Hessian that fails
/// [`validate_hessian`] triggers a forward-difference retry, whose
/// validation result is the one surfaced.
///
/// # Errors
/// `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when the
/// forward-difference Hessian is also invalid.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

/// Central second-difference Hessian of `f` at `theta`.
///
/// Step `h_i = ε^{1/4}·max(1, |θ_i|)`, which balances truncation and
/// rounding error for second differences. Costs `2n² + 1` evaluations.
///
/// # Errors
/// - Any error returned by `f`.
/// - `OptError::InvalidHessian` for non-finite entries.
pub fn hessian_from_values<F: Fn(&Theta) -> OptResult<f64>>(
    f: &F, theta: &Theta,
) -> OptResult<Hessian> {
    let n = theta.len();
    let steps: Vec<f64> =
        theta.iter().map(|t| f64::EPSILON.powf(0.25) * t.abs().max(1.0)).collect();
    let shifted = |moves: &[(usize, f64)]| -> OptResult<f64> {
        let mut x = theta.clone();
        for &(i, d) in moves {
            x[i] += d;
        }
        f(&x)
    };

    let f0 = f(theta)?;
    let mut hess = Hessian::zeros((n, n));
    for i in 0..n {
        let hi = steps[i];
        let fp = shifted(&[(i, hi)])?;
        let fm = shifted(&[(i, -hi)])?;
        hess[[i, i]] = (fp - 2.0 * f0 + fm) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let fpp = shifted(&[(i, hi), (j, hj)])?;
            let fpm = shifted(&[(i, hi), (j, -hj)])?;
            let fmp = shifted(&[(i, -hi), (j, hj)])?;
            let fmm = shifted(&[(i, -hi), (j, -hj)])?;
            let hij = (fpp - fpm - fmp + fmm) / (4.0 * hi * hj);
            hess[[i, j]] = hij;
            hess[[j, i]] = hij;
        }
    }
    validate_hessian(&hess, n)?;
    Ok(hess)
}

// ---- Helper methods ----

/// Replace each off-diagonal pair with its average; diagonal untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
