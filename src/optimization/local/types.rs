//! local::types: shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! objectives, the problem layer and the local optimizer. By defining
//! these in one place, the rest of the crate can stay agnostic to
//! `ndarray` and Argmin generics and can more easily evolve if the
//! backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients,
//!   Hessians, and scalar costs (`Theta`, `Grad`, `Hessian`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose pre-wired L-BFGS solver aliases for different line-search
//!   strategies, using the common `(Theta, Grad, Cost)` numeric shapes.
//!
//! Invariants & assumptions
//! ------------------------
//! - All vectors and matrices are `ndarray` containers over `f64`.
//! - `Cost` is the value being **minimized**: a negative log-likelihood,
//!   a negative log-prior, or their sum.
//! - The line-search aliases assume Argmin’s three-parameter forms
//!   `(Param, Gradient, Float)` as of the pinned Argmin version.
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases and constants; correctness is
//!   exercised indirectly by the optimizer tests.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `x` (or its unconstrained image `z`).
pub type Theta = Array1<f64>;

/// Gradient vector, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value being minimized.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`, `"gradient_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Step-length interval `[min, max]` for the Hager–Zhang line search.
///
/// Trial steps must stay out of the saturated tails of the bound
/// transform: there the directional derivative vanishes and the secant
/// step is `0/0`.
pub const HAGER_ZHANG_STEP_BOUNDS: (f64, f64) = (f64::EPSILON, 1.0);

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
