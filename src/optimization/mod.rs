//! optimization: local and multi-start minimization, numerical helpers,
//! and the unified error surface.
//!
//! Purpose
//! -------
//! Turn a bounded [`Problem`](crate::problem::Problem) into fitted
//! parameters: an Argmin-backed L-BFGS run from one start point
//! ([`local`]), many of those from scattered start points
//! ([`multistart`]), the stable transforms that enforce bounds
//! ([`numerical_stability`]), and a single error/result pair
//! ([`errors`]).
//!
//! Key behaviors
//! -------------
//! - Minimize objectives as given (negative log-likelihoods, negative
//!   log-priors, or their sum), in unconstrained coordinates that map into
//!   the parameter box.
//! - Fill in missing derivatives by finite differences.
//! - Normalize configuration issues, objective failures, problem-definition
//!   errors and backend solver errors into [`errors::OptError`] with the
//!   alias [`errors::OptResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Options (`Tolerances`, `LocalOptions`, `MultistartOptions`) are
//!   validated on construction and re-checked where they can be mutated
//!   directly.
//!
//! Conventions
//! -----------
//! - Parameters, gradients and Hessians use the `ndarray` aliases
//!   `Theta`, `Grad`, `Hessian` from [`local::types`].
//! - Only [`multistart`] logs (through `tracing`); the local layer is
//!   silent unless the `obs_slog` feature and `verbose` are both on.
//!
//! Downstream usage
//! ----------------
//! - Front-ends import the curated surface via `optimization::prelude::*`,
//!   or depend on the submodule preludes for a finer split.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover solver wiring, finite differences,
//!   start-point generation, engines and error conversions.
//! - `tests/integration_prior_pipeline.rs` exercises the full posterior
//!   workflow.

pub mod errors;
pub mod local;
pub mod multistart;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_posterior::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::local::prelude::*;
    pub use super::multistart::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
