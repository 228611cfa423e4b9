//! multistart: repeated local optimization from scattered start points.
//!
//! Purpose
//! -------
//! Explore multi-modal objectives by running [`minimize_local`] from many
//! start points and keeping every outcome, sorted by final value, in an
//! [`OptimizeResult`].
//!
//! Key behaviors
//! -------------
//! - [`startpoints::uniform_startpoints`]: user guesses first, then uniform
//!   draws from the free box, optionally redrawn where the objective is not
//!   finite.
//! - [`minimize`]: validates options, draws all start points from one
//!   seeded RNG, dispatches the local runs sequentially or on a rayon pool
//!   ([`Engine`]) and collects [`OptimizerResult`]s.
//! - Failing starts become records with `fval = +∞` unless
//!   `allow_failed_starts` is off.
//!
//! Invariants & assumptions
//! ------------------------
//! - Start points do not depend on the engine, so a seeded run is
//!   reproducible across engines.
//! - Start `i` has id `"i"` regardless of where it ends up after sorting.
//!
//! Conventions
//! -----------
//! - Progress is reported through `tracing`: `info` at start and end,
//!   `debug` per finished start, `warn` for failed starts and resampled
//!   start points.
//!
//! [`minimize_local`]: crate::optimization::local::minimize_local
//! [`OptimizeResult`]: crate::result::OptimizeResult
//! [`OptimizerResult`]: crate::result::OptimizerResult

pub mod api;
pub mod options;
pub mod startpoints;

pub use self::api::minimize;
pub use self::options::{Engine, MultistartOptions};
pub use self::startpoints::uniform_startpoints;

pub mod prelude {
    pub use super::api::minimize;
    pub use super::options::{Engine, MultistartOptions};
}
