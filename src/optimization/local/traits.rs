//! Configuration and outcome types for the local optimizer.
//!
//! - [`LocalOptions`] and [`Tolerances`]: configuration for one local run.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`LocalOutcome`]: normalized result returned by [`minimize_local`].
//!
//! Convention: objectives are **minimized** as given. The solver works in
//! the unconstrained coordinates of the problem's bound transform; every
//! outcome reported here is mapped back into the parameter box.
//!
//! [`minimize_local`]: crate::optimization::local::minimize_local
use crate::optimization::{
    errors::{OptError, OptResult},
    local::{
        types::{FnEvalMap, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::str::FromStr;

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Options for a single local optimization run.
///
/// Fields:
/// - `tols: Tolerances`: numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher`: line-search algorithm used by L-BFGS.
/// - `verbose: bool`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `lbfgs_mem: Option<usize>`: L-BFGS history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`](crate::optimization::local::DEFAULT_LBFGS_MEM).
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = None`, `max_iter = 1000`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl LocalOptions {
    /// Create a new set of optimizer options.
    ///
    /// Numeric tolerances are validated inside [`Tolerances::new`]; this
    /// constructor only checks the L-BFGS memory.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for LocalOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: None, max_iter: Some(1000) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize_local`.
///
/// - `x_hat`: best free parameter vector found, in box coordinates.
/// - `value`: objective value at `x_hat`.
/// - `converged`: `true` only if the solver reported convergence or a
///   reached target cost; hitting `max_iter` is not convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`
///   (`cost_count`, `gradient_count`, ...).
/// - `grad_norm`: norm of the last solver gradient (unconstrained
///   coordinates), if present.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOutcome {
    pub x_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl LocalOutcome {
    /// Build a validated [`LocalOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates any validation errors for `x_hat` or `value`.
    pub fn new(
        x_hat_opt: Option<Theta>, value: f64, termination: &TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad_norm: Option<f64>,
    ) -> OptResult<Self> {
        let x_hat = validate_theta_hat(x_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        Ok(Self { x_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }

    /// Number of objective evaluations performed by the solver.
    pub fn n_fval(&self) -> u64 {
        self.fn_evals.get("cost_count").copied().unwrap_or(0)
    }

    /// Number of gradient evaluations performed by the solver.
    pub fn n_grad(&self) -> u64 {
        self.fn_evals.get("gradient_count").copied().unwrap_or(0)
    }
}
