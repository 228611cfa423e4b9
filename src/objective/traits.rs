//! The `Objective` trait: a scalar function to be minimized, with optional
//! analytic derivatives.
//!
//! Convention: an objective returns a **negative log-density** (negative
//! log-likelihood, negative log-prior, or their sum). Optimizers minimize
//! it as given; no sign flip happens anywhere downstream.
use crate::optimization::{
    errors::{OptError, OptResult},
    local::types::{Cost, Grad, Hessian, Theta},
};

/// User-implemented objective interface.
///
/// Required:
/// - `value(&Theta) -> OptResult<Cost>`: evaluate the objective.
///
/// Optional:
/// - `grad(&Theta) -> OptResult<Grad>`: analytic gradient. The default
///   returns [`OptError::GradientNotImplemented`], which the optimizer
///   treats as "use finite differences".
/// - `hess(&Theta) -> OptResult<Hessian>`: analytic Hessian. The default
///   returns [`OptError::HessianNotImplemented`].
/// - `check(&Theta) -> OptResult<()>`: reject a parameter vector the
///   objective can never evaluate (e.g. wrong length). Called once per
///   start before optimization.
///
/// Objectives are shared across worker threads by the multi-start engine,
/// hence the `Send + Sync` bound.
pub trait Objective: Send + Sync {
    // Required methods
    fn value(&self, x: &Theta) -> OptResult<Cost>;

    // Optional methods
    fn grad(&self, _x: &Theta) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn hess(&self, _x: &Theta) -> OptResult<Hessian> {
        Err(OptError::HessianNotImplemented)
    }

    fn check(&self, _x: &Theta) -> OptResult<()> {
        Ok(())
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        (**self).value(x)
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        (**self).grad(x)
    }

    fn hess(&self, x: &Theta) -> OptResult<Hessian> {
        (**self).hess(x)
    }

    fn check(&self, x: &Theta) -> OptResult<()> {
        (**self).check(x)
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        (**self).value(x)
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        (**self).grad(x)
    }

    fn hess(&self, x: &Theta) -> OptResult<Hessian> {
        (**self).hess(x)
    }

    fn check(&self, x: &Theta) -> OptResult<()> {
        (**self).check(x)
    }
}
