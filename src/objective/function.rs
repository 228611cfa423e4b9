//! `FunctionObjective`: an [`Objective`] backed by plain closures.
//!
//! The usual way to hand a likelihood to the optimizer: a closure
//! returning `(value, gradient)`, or a value-only closure when no gradient
//! is available. An analytic Hessian can be attached separately.
use crate::{
    objective::traits::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::{
            types::{Cost, Grad, Hessian, Theta},
            validation::{validate_grad, validate_hessian},
        },
    },
};

type ValueGradFn = dyn Fn(&Theta) -> (Cost, Grad) + Send + Sync;
type ValueFn = dyn Fn(&Theta) -> Cost + Send + Sync;
type HessFn = dyn Fn(&Theta) -> Hessian + Send + Sync;

enum Callable {
    WithGrad(Box<ValueGradFn>),
    ValueOnly(Box<ValueFn>),
}

/// Objective defined by user closures.
///
/// - [`FunctionObjective::with_grad`]: closure returns `(value, gradient)`.
///   `value()` discards the gradient, `grad()` discards the value.
/// - [`FunctionObjective::value_only`]: closure returns the value; the
///   optimizer differentiates numerically.
/// - [`FunctionObjective::with_hess`]: attach an analytic Hessian.
///
/// Returned gradients and Hessians are validated against the length of the
/// evaluation point, so a closure with the wrong dimension fails loudly.
pub struct FunctionObjective {
    fun: Callable,
    hess: Option<Box<HessFn>>,
}

impl FunctionObjective {
    pub fn with_grad<F>(fun: F) -> Self
    where
        F: Fn(&Theta) -> (Cost, Grad) + Send + Sync + 'static,
    {
        Self { fun: Callable::WithGrad(Box::new(fun)), hess: None }
    }

    pub fn value_only<F>(fun: F) -> Self
    where
        F: Fn(&Theta) -> Cost + Send + Sync + 'static,
    {
        Self { fun: Callable::ValueOnly(Box::new(fun)), hess: None }
    }

    pub fn with_hess<H>(mut self, hess: H) -> Self
    where
        H: Fn(&Theta) -> Hessian + Send + Sync + 'static,
    {
        self.hess = Some(Box::new(hess));
        self
    }

    /// Whether the closure supplies an analytic gradient.
    pub fn has_grad(&self) -> bool {
        matches!(self.fun, Callable::WithGrad(_))
    }
}

impl std::fmt::Debug for FunctionObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionObjective")
            .field("has_grad", &self.has_grad())
            .field("has_hess", &self.hess.is_some())
            .finish()
    }
}

impl Objective for FunctionObjective {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        Ok(match &self.fun {
            Callable::WithGrad(f) => f(x).0,
            Callable::ValueOnly(f) => f(x),
        })
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        match &self.fun {
            Callable::WithGrad(f) => {
                let (_, grad) = f(x);
                validate_grad(&grad, x.len())?;
                Ok(grad)
            }
            Callable::ValueOnly(_) => Err(OptError::GradientNotImplemented),
        }
    }

    fn hess(&self, x: &Theta) -> OptResult<Hessian> {
        let h = self.hess.as_ref().ok_or(OptError::HessianNotImplemented)?;
        let hess = h(x);
        validate_hessian(&hess, x.len())?;
        Ok(hess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // A `(value, gradient)` closure serves both halves independently.
    fn with_grad_splits_value_and_gradient() {
        let obj = FunctionObjective::with_grad(|x: &Theta| (x.dot(x), x.mapv(|v| 2.0 * v)));
        let x = array![1.0, -2.0];

        assert_eq!(obj.value(&x), Ok(5.0));
        assert_eq!(obj.grad(&x), Ok(array![2.0, -4.0]));
        assert!(obj.has_grad());
        assert_eq!(obj.hess(&x), Err(OptError::HessianNotImplemented));
    }

    #[test]
    // Purpose
    // -------
    // A value-only closure signals the finite-difference fallback.
    fn value_only_reports_missing_gradient() {
        let obj = FunctionObjective::value_only(|x: &Theta| x.sum());

        assert_eq!(obj.value(&array![1.0, 2.0]), Ok(3.0));
        assert_eq!(obj.grad(&array![1.0, 2.0]), Err(OptError::GradientNotImplemented));
    }

    #[test]
    // Purpose
    // -------
    // Gradients and Hessians of the wrong size are rejected.
    fn wrong_dimension_derivatives_are_rejected() {
        let obj = FunctionObjective::with_grad(|_x: &Theta| (0.0, array![1.0]))
            .with_hess(|_x: &Theta| Array2::eye(3));
        let x = array![0.0, 0.0];

        assert_eq!(obj.grad(&x), Err(OptError::GradientDimMismatch { expected: 2, found: 1 }));
        assert!(matches!(obj.hess(&x), Err(OptError::HessianDimMismatch { expected: 2, .. })));
    }
}
