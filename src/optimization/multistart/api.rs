//! Multi-start driver: draw start points, run one local optimization per
//! point, collect the sorted records.
use crate::{
    objective::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::{
            Grad, Hessian, Theta,
            finite_diff::{compute_hessian, hessian_from_values},
            minimize_local,
        },
        multistart::{
            options::{Engine, MultistartOptions},
            startpoints::uniform_startpoints,
        },
    },
    problem::Problem,
    result::{OptimizeResult, OptimizerResult},
};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run `n_starts` local optimizations of `problem` and collect the results.
///
/// # Behavior
/// - Start points come from [`uniform_startpoints`], seeded from
///   `opts.seed` (or entropy), and are all drawn before any local run.
/// - Each start runs [`minimize_local`] with `opts.local`, on the calling
///   thread ([`Engine::SingleCore`]) or a dedicated rayon pool
///   ([`Engine::MultiThread`]). Start `i` gets id `"i"`.
/// - A start whose local run fails is recorded with `fval = +∞` and the
///   error text when `opts.allow_failed_starts`; otherwise the first such
///   error is returned.
/// - With `opts.compute_hessian`, the Hessian over the free parameters is
///   taken from the objective or by finite differences.
///
/// # Errors
/// - [`OptError::InvalidStartCount`] for `n_starts == 0`.
/// - Option validation and start-point errors.
/// - [`OptError::ThreadPool`] if the rayon pool cannot be built.
/// - Local-run errors when failed starts are not allowed.
pub fn minimize<O: Objective>(
    problem: &Problem<O>, n_starts: usize, opts: &MultistartOptions,
) -> OptResult<OptimizeResult> {
    if n_starts == 0 {
        return Err(OptError::InvalidStartCount { n_starts });
    }
    opts.validate()?;
    let started = Instant::now();

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let startpoints = uniform_startpoints(
        problem,
        n_starts,
        &mut rng,
        opts.startpoint_resample,
        opts.max_resample,
    )?;

    info!(
        n_starts = n_starts,
        dim = problem.dim(),
        engine = ?opts.engine,
        line_search = ?opts.local.line_searcher,
        "Starting multi-start optimization"
    );

    let records: Vec<OptResult<OptimizerResult>> = match opts.engine {
        Engine::SingleCore => startpoints
            .iter()
            .enumerate()
            .map(|(i, x0)| run_start(problem, i, x0, opts))
            .collect(),
        Engine::MultiThread { n_threads } => {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = n_threads {
                builder = builder.num_threads(n);
            }
            let pool = builder
                .build()
                .map_err(|e| OptError::ThreadPool { text: e.to_string() })?;
            pool.install(|| {
                startpoints
                    .par_iter()
                    .enumerate()
                    .map(|(i, x0)| run_start(problem, i, x0, opts))
                    .collect()
            })
        }
    };
    let records = records.into_iter().collect::<OptResult<Vec<_>>>()?;
    let result = OptimizeResult::new(records);

    info!(
        n_starts = result.len(),
        converged = result.n_converged(),
        failed = result.n_failed(),
        best_fval = result.best().map(|r| r.fval).unwrap_or(f64::INFINITY),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Multi-start optimization finished"
    );
    Ok(result)
}

// ---- Helper Methods ----

fn run_start<O: Objective>(
    problem: &Problem<O>, index: usize, x0: &Theta, opts: &MultistartOptions,
) -> OptResult<OptimizerResult> {
    let started = Instant::now();
    let id = index.to_string();
    let x0_full = problem.full_vector(x0)?;
    let fval0 = problem.value_free(x0).ok().filter(|v| v.is_finite());

    let outcome = match minimize_local(problem, x0, &opts.local) {
        Ok(outcome) => outcome,
        Err(err) if opts.allow_failed_starts => {
            warn!(start = %id, error = %err, "Local optimization failed");
            return Ok(OptimizerResult::failed(
                id,
                x0_full,
                fval0,
                err.to_string(),
                started.elapsed(),
            ));
        }
        Err(err) => return Err(err),
    };

    let x_full = problem.full_vector(&outcome.x_hat)?;
    let grad = problem.objective().grad(&x_full).ok();
    let hess = if opts.compute_hessian {
        match free_hessian(problem, &outcome.x_hat) {
            Ok(h) => Some(h),
            Err(err) => {
                warn!(start = %id, error = %err, "Hessian unavailable");
                None
            }
        }
    } else {
        None
    };

    debug!(
        start = %id,
        fval = outcome.value,
        iterations = outcome.iterations,
        converged = outcome.converged,
        status = %outcome.status,
        "Local optimization finished"
    );

    Ok(OptimizerResult {
        id,
        x: Some(x_full),
        fval: outcome.value,
        grad,
        hess,
        x0: x0_full,
        fval0,
        n_fval: outcome.n_fval(),
        n_grad: outcome.n_grad(),
        n_iter: outcome.iterations,
        converged: outcome.converged,
        status: outcome.status,
        message: None,
        time: started.elapsed(),
    })
}

/// Hessian over the free parameters at free coordinates `x`.
///
/// Uses the objective's analytic Hessian (restricted to free rows and
/// columns) when available, otherwise differences the analytic gradient,
/// otherwise takes second differences of the value.
fn free_hessian<O: Objective>(problem: &Problem<O>, x: &Theta) -> OptResult<Hessian> {
    match problem.objective().hess(&problem.full_vector(x)?) {
        Ok(full) => {
            let free = problem.x_free_indices();
            Ok(Hessian::from_shape_fn((free.len(), free.len()), |(i, j)| {
                full[[free[i], free[j]]]
            }))
        }
        Err(OptError::HessianNotImplemented) => match problem.grad_free(x) {
            Ok(_) => {
                let grad_fn = |y: &Theta| {
                    problem.grad_free(y).unwrap_or_else(|_| Grad::from_elem(y.len(), f64::NAN))
                };
                compute_hessian(&grad_fn, x)
            }
            Err(OptError::GradientNotImplemented) => {
                hessian_from_values(&|y: &Theta| problem.value_free(y), x)
            }
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    }
}
