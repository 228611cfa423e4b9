//! rust_posterior: posterior objectives with parameter priors, bounded
//! multi-start optimization and result plots.
//!
//! Purpose
//! -------
//! Estimate parameters by minimizing a negative log-posterior: a negative
//! log-likelihood plus negated per-parameter log-priors, subject to box
//! constraints. The crate provides the objective algebra, the problem
//! definition, an Argmin-backed multi-start optimizer and SVG diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`objective`]: the [`Objective`] trait, closure-backed likelihoods,
//!   [`NegLogParameterPriors`] and [`AggregatedObjective`].
//! - [`problem`]: [`Problem`] bundles an objective with bounds, fixed
//!   parameters, names and start guesses.
//! - [`optimization`]: L-BFGS local runs in unconstrained coordinates and
//!   the multi-start [`minimize`] entry point.
//! - [`result`]: per-start records and the value-sorted collection.
//! - [`visualize`]: waterfall and parameter plots.
//!
//! Conventions
//! -----------
//! - Objectives are minimized as given; log-densities are negated before
//!   they enter an aggregate.
//! - Vectors and matrices are `ndarray` types over `f64`.
//! - Fallible operations return typed errors ([`OptError`],
//!   [`problem::errors::ProblemError`], [`visualize::PlotError`]); nothing
//!   in the library panics on bad input.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::array;
//! use rust_posterior::{
//!     AggregatedObjective, FunctionObjective, MultistartOptions, NegLogParameterPriors,
//!     Objective, PriorTerm, Problem, minimize,
//! };
//!
//! let nllh = FunctionObjective::with_grad(|x: &ndarray::Array1<f64>| {
//!     (x.dot(x), 2.0 * x)
//! });
//! let priors = NegLogParameterPriors::new(vec![
//!     PriorTerm::new(0, |v: f64| -0.5 * v * v).with_dx(|v: f64| -v),
//! ]);
//! let posterior = AggregatedObjective::new(vec![
//!     Box::new(nllh) as Box<dyn Objective>,
//!     Box::new(priors),
//! ])?;
//! let problem = Problem::new(posterior, array![-5.0, -5.0], array![5.0, 5.0])?;
//! let result = minimize(&problem, 10, &MultistartOptions::default())?;
//! println!("{}", result.summary());
//! # Ok::<(), rust_posterior::OptError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover.
//! - `tests/integration_prior_pipeline.rs` runs the full
//!   likelihood → priors → posterior → optimize → plot workflow on the
//!   Rosenbrock function.

pub mod objective;
pub mod optimization;
pub mod problem;
pub mod result;
pub mod visualize;

pub use crate::objective::{
    AggregatedObjective, FunctionObjective, NegLogParameterPriors, Objective, PriorTerm,
};
pub use crate::optimization::errors::{OptError, OptResult};
pub use crate::optimization::multistart::{Engine, MultistartOptions, minimize};
pub use crate::problem::Problem;
pub use crate::result::{OptimizeResult, OptimizerResult};
