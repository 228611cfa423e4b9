//! objective: scalar functions to minimize and their composition.
//!
//! Purpose
//! -------
//! Define what the optimizer minimizes: the [`Objective`] trait, a
//! closure-backed implementation for likelihoods ([`FunctionObjective`]),
//! per-parameter priors ([`NegLogParameterPriors`]) and summation
//! ([`AggregatedObjective`]).
//!
//! Key behaviors
//! -------------
//! - A negative log-posterior is built as
//!   `AggregatedObjective::new(vec![nllh, neg_log_priors])`.
//! - Missing analytic derivatives are signalled with
//!   `OptError::GradientNotImplemented` / `OptError::HessianNotImplemented`
//!   and filled in numerically by the optimization layer.
//!
//! Conventions
//! -----------
//! - Objectives are minimized as given: they return negative log-densities.
//! - Parameter vectors passed to objectives are always full-dimension
//!   (fixed parameters included).
//!
//! Testing notes
//! -------------
//! - Each submodule tests its own arithmetic against closed forms.

pub mod aggregated;
pub mod function;
pub mod priors;
pub mod traits;

pub use self::aggregated::AggregatedObjective;
pub use self::function::FunctionObjective;
pub use self::priors::{NegLogParameterPriors, PriorTerm};
pub use self::traits::Objective;
