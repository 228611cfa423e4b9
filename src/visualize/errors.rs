//! Errors raised while drawing result figures.
use plotters::drawing::DrawingAreaErrorKind;

/// Result alias for plotting paths.
pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// No start has a finite final value.
    NoFiniteResults,

    /// A result vector does not match the problem dimension.
    DimensionMismatch { expected: usize, found: usize },

    /// Figure options are unusable.
    InvalidOptions { reason: &'static str },

    /// Drawing backend failure (I/O, layout).
    Backend { text: String },
}

impl std::error::Error for PlotError {}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::NoFiniteResults => {
                write!(f, "Nothing to plot: no start reached a finite objective value")
            }
            PlotError::DimensionMismatch { expected, found } => {
                write!(f, "Result has {found} parameters, problem has {expected}")
            }
            PlotError::InvalidOptions { reason } => write!(f, "Invalid plot options: {reason}"),
            PlotError::Backend { text } => write!(f, "Plot backend error: {text}"),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Backend { text: err.to_string() }
    }
}
