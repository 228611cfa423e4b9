//! result: records produced by multi-start optimization.
//!
//! Purpose
//! -------
//! Hold what every start of a run produced ([`OptimizerResult`]) and the
//! value-sorted collection of all starts ([`OptimizeResult`]) that the
//! plotting layer and callers consume.
//!
//! Invariants & assumptions
//! ------------------------
//! - An [`OptimizeResult`] is always sorted by ascending `fval`; the best
//!   start is the first entry.
//! - Points (`x`, `x0`) and gradients are full dimension; Hessians cover
//!   the free parameters only.
//! - A failed start has `fval = +∞`, no `x` and an error `message`.

pub mod optimize_result;
pub mod optimizer_result;

pub use self::optimize_result::OptimizeResult;
pub use self::optimizer_result::OptimizerResult;
