//! High-level entry point for a single local run on a bounded [`Problem`].
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the problem in an [`ArgMinAdapter`] (which works in the
//! unconstrained coordinates of the bound transform), and delegates the run
//! to [`run_lbfgs`].
use crate::{
    objective::Objective,
    optimization::{
        errors::OptResult,
        local::{
            adapter::ArgMinAdapter,
            builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
            run::run_lbfgs,
            traits::{LineSearcher, LocalOptions, LocalOutcome},
            types::Theta,
        },
    },
    problem::Problem,
};

/// Minimize a problem's objective from one start point using L-BFGS.
///
/// # Behavior
/// - Checks that `x0_free` has one entry per free parameter.
/// - Runs [`Objective::check`] on the full-dimension start point.
/// - Maps `x0_free` into unconstrained coordinates (points on a bound are
///   pulled inside by a small margin).
/// - Builds an L-BFGS solver with the line search named by
///   `opts.line_searcher` and runs it through [`run_lbfgs`].
///
/// # Errors
/// - `OptError::ThetaLengthMismatch` for a start point of the wrong length.
/// - `OptError::SolverExit` when the solver stops on an internal failure.
/// - Propagates errors from `check`, the builders, and the solver run.
///
/// # Returns
/// A [`LocalOutcome`] with `x_hat` in free box coordinates.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_posterior::objective::FunctionObjective;
/// use rust_posterior::optimization::local::{minimize_local, LocalOptions, Theta};
/// use rust_posterior::problem::Problem;
///
/// let f = FunctionObjective::value_only(|x: &Theta| x.dot(x));
/// let problem = Problem::new(f, array![-1.0, -1.0], array![1.0, 1.0])?;
/// let out = minimize_local(&problem, &array![0.5, -0.5], &LocalOptions::default())?;
/// println!("x̂ = {:?}", out.x_hat);
/// # Ok::<(), rust_posterior::optimization::errors::OptError>(())
/// ```
pub fn minimize_local<O: Objective>(
    problem: &Problem<O>, x0_free: &Theta, opts: &LocalOptions,
) -> OptResult<LocalOutcome> {
    problem.objective().check(&problem.full_vector(x0_free)?)?;
    let adapter = ArgMinAdapter::new(problem);
    let z0 = adapter.to_unconstrained(x0_free);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(z0, opts, adapter, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(z0, opts, adapter, solver)
        }
    }
}
