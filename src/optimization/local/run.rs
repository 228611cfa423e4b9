//! Execution helper that runs an `argmin` solver on a bounded problem and
//! returns a crate-friendly [`LocalOutcome`].
use crate::{
    objective::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::{
            adapter::ArgMinAdapter,
            traits::{LocalOptions, LocalOutcome},
            types::{Grad, Theta},
        },
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization in the unconstrained space of a problem.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the bounded problem via [`ArgMinAdapter`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang or More–Thuente),
/// - the initial point `z0` (already unconstrained),
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///
/// then executes the solver and converts the result into [`LocalOutcome`].
///
/// # Type Parameters
/// - `O`: objective of the wrapped problem.
/// - `S`: any `argmin` solver whose `Problem` is `ArgMinAdapter<'a, O>` and
///   whose `IterState` matches `Theta` (parameters), `Grad` (gradient) and
///   `f64` as the float type.
///
/// # Feature flags
/// If `obs_slog` is enabled and `opts.verbose == true`, a terminal slog
/// observer is attached with `ObserverMode::Always` and a one-time line logs
/// the initial cost and, if available, the gradient norm.
///
/// # Returns
/// A [`LocalOutcome`] whose `x_hat` is the best point mapped back into the
/// box (free coordinates) and whose `value` is the best cost.
///
/// # Errors
/// - Propagates any `argmin` runtime error through `From<argmin::core::Error>`.
/// - [`OptError::SolverExit`] when the solver stops on an internal failure,
///   such as a line search that hit a non-finite cost or coordinate. The
///   best point so far is discarded in that case.
/// - Propagates validation errors from [`LocalOutcome::new`].
pub fn run_lbfgs<'a, O, S>(
    z0: Theta, opts: &LocalOptions, problem: ArgMinAdapter<'a, O>, solver: S,
) -> OptResult<LocalOutcome>
where
    O: Objective,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, O>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&z0, &problem)?;
    }
    let transform = problem.transform.clone();
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(z0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    if let TerminationStatus::Terminated(TerminationReason::SolverExit(text)) = &termination {
        return Err(OptError::SolverExit { text: text.clone() });
    }
    let grad_norm = result.take_gradient().map(|g| g.l2_norm());
    LocalOutcome::new(
        result.take_best_param().map(|z| transform.to_box(&z)),
        result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
        grad_norm,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<O>(z0: &Theta, problem: &ArgMinAdapter<'_, O>) -> OptResult<()>
where
    O: Objective,
{
    let c0 = problem.cost(z0)?;
    let g0n = problem.gradient(z0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(z0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
