//! Unified error surface for objectives, problems and optimizers.
//!
//! Every fallible operation in the optimization layer returns
//! [`OptResult<T>`]. Backend errors raised by argmin, problem-definition
//! errors ([`ProblemError`]) and objective errors all normalize into
//! [`OptError`], so callers only ever match on a single enum.
use argmin::core::{ArgminError, Error};

use crate::problem::errors::ProblemError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Derivatives ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Objective provides no analytic Hessian.
    HessianNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Hessian values need to be finite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Options ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    /// Multi-start needs at least one start.
    InvalidStartCount {
        n_starts: usize,
    },

    /// Resampling needs at least one attempt.
    InvalidMaxResample {
        max_resample: usize,
    },

    /// Thread count for the parallel engine must be positive.
    InvalidThreadCount {
        n_threads: usize,
    },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// Prior term refers to a parameter outside the parameter vector.
    PriorIndexOutOfBounds {
        index: usize,
        dim: usize,
    },

    /// An aggregated objective needs at least one member.
    EmptyAggregate,

    /// Parameter vector has the wrong length for the problem.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    // ---- Start points ----
    /// Uniform start points need finite bounds.
    UnboundedSampling {
        index: usize,
        lb: f64,
        ub: f64,
    },

    /// No admissible start point found within the resampling budget.
    StartpointResampleExhausted {
        attempts: usize,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    /// The solver proposed a non-finite point in unconstrained coordinates.
    NonFiniteSolverParam {
        index: usize,
        value: f64,
    },

    /// The solver stopped on an internal failure (e.g. a failed line search)
    /// instead of converging or running out of iterations.
    SolverExit {
        text: String,
    },

    // ---- Problem definition ----
    /// Wrapper for problem-definition errors.
    Problem(ProblemError),

    // ---- Engine ----
    /// Thread pool could not be created.
    ThreadPool {
        text: String,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Derivatives ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient not implemented")
            }
            OptError::HessianNotImplemented => {
                write!(f, "Hessian not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Options ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidStartCount { n_starts } => {
                write!(f, "Invalid number of starts {n_starts}: must be greater than zero")
            }
            OptError::InvalidMaxResample { max_resample } => {
                write!(f, "Invalid resample budget {max_resample}: must be greater than zero")
            }
            OptError::InvalidThreadCount { n_threads } => {
                write!(f, "Invalid thread count {n_threads}: must be greater than zero")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite objective value: {value}")
            }
            OptError::PriorIndexOutOfBounds { index, dim } => {
                write!(f, "Prior refers to parameter {index}, but the parameter vector has length {dim}")
            }
            OptError::EmptyAggregate => {
                write!(f, "Aggregated objective needs at least one member objective")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }

            // ---- Start points ----
            OptError::UnboundedSampling { index, lb, ub } => {
                write!(
                    f,
                    "Cannot sample start points uniformly: parameter {index} has bounds [{lb}, {ub}]"
                )
            }
            OptError::StartpointResampleExhausted { attempts } => {
                write!(f, "No start point with a finite objective value after {attempts} attempts")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::NonFiniteSolverParam { index, value } => {
                write!(f, "Non-finite solver coordinate at index {index}: {value}")
            }
            OptError::SolverExit { text } => {
                write!(f, "Solver exited without converging: {text}")
            }

            // ---- Problem definition ----
            OptError::Problem(err) => {
                write!(f, "Invalid problem: {err}")
            }

            // ---- Engine ----
            OptError::ThreadPool { text } => {
                write!(f, "Thread pool error: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Objective errors travel through argmin as boxed `OptError`s.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ProblemError> for OptError {
    fn from(err: ProblemError) -> Self {
        OptError::Problem(err)
    }
}
