//! numerical_stability: numerically robust transforms for bound handling.
//!
//! Purpose
//! -------
//! Collect the numerically stable scalar transforms used to map an
//! unconstrained optimizer coordinate into a bounded parameter interval
//! and back. This module centralizes the small margin used when a point
//! sits exactly on a bound, so the problem and optimizer layers can
//! assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide stable `safe_softplus` / `safe_softplus_inv` for half-bounded
//!   coordinates (ℝ ↔ (0, ∞)).
//! - Provide stable `safe_logistic` / `safe_logit` for doubly bounded
//!   coordinates (ℝ ↔ (0, 1)).
//! - Expose `BOUND_MARGIN`, the relative distance kept from a finite
//!   bound before inverting a transform.
//!
//! Invariants & assumptions
//! ------------------------
//! - All transforms assume finite `f64` inputs; bound validation happens
//!   in the problem layer.
//! - Forward transforms never overflow; inverse transforms require inputs
//!   strictly inside their domain.
//!
//! Conventions
//! -----------
//! - This module never logs, performs I/O, or touches global state.
//!
//! Downstream usage
//! ----------------
//! - `problem::bounds::BoundTransform` composes these transforms per
//!   coordinate and applies the chain rule with `safe_logistic` as the
//!   derivative of softplus.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas,
//!   inverse pairs and tail behavior.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    BOUND_MARGIN, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        BOUND_MARGIN, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    };
}
