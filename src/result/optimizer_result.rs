//! Record of one local optimization start.
use crate::optimization::local::{Grad, Hessian, Theta};
use std::time::Duration;

/// Outcome of a single start of a multi-start run.
///
/// Fields:
/// - `id`: start identifier, `"0"`, `"1"`, ... in the order start points
///   were drawn (prefixed after [`OptimizeResult::append`](super::OptimizeResult::append)).
/// - `x`: final parameters, full dimension; `None` for a failed start.
/// - `fval`: final objective value; `+∞` for a failed start.
/// - `grad`: objective gradient at `x`, full dimension, when available.
/// - `hess`: Hessian at `x` over the free parameters, when requested.
/// - `x0`, `fval0`: start point (full dimension) and its objective value.
/// - `n_fval`, `n_grad`, `n_iter`: solver counters.
/// - `converged`, `status`: solver termination report.
/// - `message`: error text of a failed start.
/// - `time`: wall time spent on this start.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerResult {
    pub id: String,
    pub x: Option<Theta>,
    pub fval: f64,
    pub grad: Option<Grad>,
    pub hess: Option<Hessian>,
    pub x0: Theta,
    pub fval0: Option<f64>,
    pub n_fval: u64,
    pub n_grad: u64,
    pub n_iter: usize,
    pub converged: bool,
    pub status: String,
    pub message: Option<String>,
    pub time: Duration,
}

impl OptimizerResult {
    /// Record for a start whose local run returned an error.
    pub fn failed(
        id: String, x0: Theta, fval0: Option<f64>, message: String, time: Duration,
    ) -> Self {
        Self {
            id,
            x: None,
            fval: f64::INFINITY,
            grad: None,
            hess: None,
            x0,
            fval0,
            n_fval: 0,
            n_grad: 0,
            n_iter: 0,
            converged: false,
            status: "Failed".to_string(),
            message: Some(message),
            time,
        }
    }

    /// `true` when the start produced a finite final value.
    pub fn is_finite(&self) -> bool {
        self.fval.is_finite()
    }

    /// `true` when the local run returned an error.
    pub fn is_failed(&self) -> bool {
        self.message.is_some()
    }
}
