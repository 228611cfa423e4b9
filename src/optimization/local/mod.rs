//! local: argmin-powered L-BFGS runs on a bounded problem.
//!
//! Purpose
//! -------
//! Provide the single-start optimizer used by the multi-start driver.
//! Callers hand over a [`Problem`](crate::problem::Problem), a start point in
//! free box coordinates and a [`LocalOptions`]; [`minimize_local`] runs
//! L-BFGS with a configurable line search and returns a [`LocalOutcome`].
//!
//! Key behaviors
//! -------------
//! - Enforce box constraints by a change of variables: the solver moves in
//!   unconstrained `z`, the objective sees `x(z)` (see
//!   [`crate::problem::bounds`]).
//! - Pull analytic gradients back to `z` with the chain rule, or fall back to
//!   finite differences of the cost when the objective has no gradient
//!   ([`adapter::ArgMinAdapter`], [`finite_diff`]).
//! - Centralize configuration ([`Tolerances`], [`LocalOptions`]) and
//!   validation ([`validation`]) so the solver layer can assume finite,
//!   consistent inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are minimized as given; there is no sign flip anywhere in
//!   this module.
//! - Every reported point lies inside the problem's bounds.
//! - Objective failures surface as [`OptError`](crate::optimization::errors::OptError)
//!   values, never panics.
//!
//! Downstream usage
//! ----------------
//! - [`crate::optimization::multistart`] calls [`minimize_local`] once per
//!   start point and uses [`finite_diff::compute_hessian`] for optional
//!   Hessians.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the chain rule and the numeric fallback
//!   ([`adapter`]), solver construction ([`builders`]), finite differences
//!   ([`finite_diff`]), validation ([`validation`]), configuration
//!   ([`traits`]) and whole runs on toy quadratics ([`api`]).

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize_local;
pub use self::traits::{LineSearcher, LocalOptions, LocalOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::minimize_local;
    pub use super::traits::{LineSearcher, LocalOptions, LocalOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Hessian, Theta};
}
