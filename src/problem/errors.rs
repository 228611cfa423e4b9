//! Errors raised while defining a [`Problem`](crate::problem::Problem).
//!
//! All indices are 0-based positions in the full parameter vector.
//! Every variant converts into `OptError::Problem` so problem setup and
//! optimization can share one `?` chain.

/// Result alias for problem-definition paths.
pub type ProblemResult<T> = Result<T, ProblemError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    // ---- Bounds ----
    /// Problem needs at least one parameter.
    EmptyBounds,

    /// `lb` and `ub` must have the same length.
    BoundsLengthMismatch { lb: usize, ub: usize },

    /// A bound pair is unusable.
    InvalidBounds { index: usize, lb: f64, ub: f64, reason: &'static str },

    // ---- Fixed parameters ----
    /// One value per fixed index.
    FixedLengthMismatch { indices: usize, values: usize },

    /// Fixed index past the parameter vector.
    FixedIndexOutOfRange { index: usize, dim: usize },

    /// Fixed index listed twice.
    DuplicateFixedIndex { index: usize },

    /// Fixed value outside its bounds.
    FixedValueOutOfBounds { index: usize, value: f64 },

    /// All parameters fixed.
    NoFreeParameters,

    // ---- Names and guesses ----
    /// One name per parameter.
    NamesLengthMismatch { expected: usize, found: usize },

    /// Guess has the wrong length.
    GuessLengthMismatch { guess: usize, expected: usize, found: usize },

    /// Guess coordinate outside the bounds or non-finite.
    GuessOutOfBounds { guess: usize, index: usize, value: f64 },
}

impl std::error::Error for ProblemError {}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::EmptyBounds => write!(f, "Problem has no parameters"),
            ProblemError::BoundsLengthMismatch { lb, ub } => {
                write!(f, "Bounds length mismatch: lb has {lb} entries, ub has {ub}")
            }
            ProblemError::InvalidBounds { index, lb, ub, reason } => {
                write!(f, "Invalid bounds [{lb}, {ub}] for parameter {index}: {reason}")
            }
            ProblemError::FixedLengthMismatch { indices, values } => {
                write!(f, "Fixed parameters: {indices} indices but {values} values")
            }
            ProblemError::FixedIndexOutOfRange { index, dim } => {
                write!(f, "Fixed index {index} out of range for {dim} parameters")
            }
            ProblemError::DuplicateFixedIndex { index } => {
                write!(f, "Fixed index {index} listed more than once")
            }
            ProblemError::FixedValueOutOfBounds { index, value } => {
                write!(f, "Fixed value {value} for parameter {index} lies outside its bounds")
            }
            ProblemError::NoFreeParameters => write!(f, "All parameters are fixed"),
            ProblemError::NamesLengthMismatch { expected, found } => {
                write!(f, "Parameter names: expected {expected}, found {found}")
            }
            ProblemError::GuessLengthMismatch { guess, expected, found } => {
                write!(f, "Guess {guess} has length {found}, expected {expected}")
            }
            ProblemError::GuessOutOfBounds { guess, index, value } => {
                write!(f, "Guess {guess} has value {value} for parameter {index}, outside its bounds")
            }
        }
    }
}
