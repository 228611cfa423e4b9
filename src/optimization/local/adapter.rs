//! Adapter that exposes a bounded [`Problem`] as an unconstrained `argmin`
//! problem.
//!
//! The solver moves in `z`-space; every evaluation maps `z` into the box
//! with the problem's [`BoundTransform`], fills in fixed parameters and
//! calls the objective. Analytic gradients are pulled back with the chain
//! rule `∂c/∂z = ∂f/∂x ⊙ dx/dz`. Without an analytic gradient the cost
//! itself is finite-differenced in `z`, so no chain rule is needed in that
//! branch.
use std::cell::RefCell;

use crate::{
    objective::Objective,
    optimization::{
        errors::OptError,
        local::{
            finite_diff::fd_gradient,
            types::{Cost, Grad, Theta},
            validation::validate_grad,
        },
    },
    problem::{Problem, bounds::BoundTransform},
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a [`Problem`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, O: Objective> {
    pub problem: &'a Problem<O>,
    pub transform: BoundTransform,
}

impl<'a, O: Objective> ArgMinAdapter<'a, O> {
    pub fn new(problem: &'a Problem<O>) -> Self {
        Self { problem, transform: problem.bound_transform() }
    }

    /// Free parameters in box coordinates for solver coordinates `z`.
    pub fn to_box(&self, z: &Theta) -> Theta {
        self.transform.to_box(z)
    }

    /// Solver coordinates for free parameters `x`.
    pub fn to_unconstrained(&self, x: &Theta) -> Theta {
        self.transform.to_unconstrained(x)
    }
}

/// Reject a solver point with a `NaN` or infinite coordinate before it is
/// mapped into the box.
fn check_solver_param(z: &Theta) -> Result<(), OptError> {
    match z.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::NonFiniteSolverParam { index, value: z[index] }),
        None => Ok(()),
    }
}

impl<'a, O: Objective> CostFunction for ArgMinAdapter<'a, O> {
    type Param = Theta;
    type Output = Cost;

    /// Objective value at `x(z)`; non-finite `z` or values are errors.
    fn cost(&self, z: &Self::Param) -> Result<Self::Output, Error> {
        check_solver_param(z)?;
        let value = self.problem.value_free(&self.to_box(z))?;
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(value)
    }
}

impl<'a, O: Objective> Gradient for ArgMinAdapter<'a, O> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost with respect to `z`.
    ///
    /// - Analytic: validate `∂f/∂x`, then scale by `dx/dz`.
    /// - `GradientNotImplemented`: finite differences of [`CostFunction::cost`]
    ///   (central first, forward retry), with cost errors captured in a
    ///   `RefCell` because the difference closures must return `f64`.
    /// - Any other objective error is propagated, as is a non-finite `z`.
    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, Error> {
        check_solver_param(z)?;
        let dim = z.len();
        match self.problem.grad_free(&self.to_box(z)) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g * self.transform.jacobian_diag(z))
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |z: &Theta| -> f64 {
                    match self.cost(z) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                Ok(fd_gradient(z, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::FunctionObjective;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn quadratic_problem(with_grad: bool) -> Problem<FunctionObjective> {
        let objective = if with_grad {
            FunctionObjective::with_grad(|x: &Theta| {
                ((x[0] - 1.0).powi(2) + 3.0 * x[1], array![2.0 * (x[0] - 1.0), 3.0])
            })
        } else {
            FunctionObjective::value_only(|x: &Theta| (x[0] - 1.0).powi(2) + 3.0 * x[1])
        };
        Problem::new(objective, array![-2.0, 0.0], array![2.0, f64::INFINITY]).expect("valid")
    }

    #[test]
    // Purpose
    // -------
    // The cost is the objective at the mapped point, without sign flips.
    fn cost_evaluates_objective_in_box_coordinates() {
        let problem = quadratic_problem(true);
        let adapter = ArgMinAdapter::new(&problem);
        let z = adapter.to_unconstrained(&array![0.5, 2.0]);

        let cost = adapter.cost(&z).expect("finite cost");

        assert_relative_eq!(cost, 0.25 + 6.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Analytic and finite-difference gradients agree in `z`-space, which
    // checks the chain rule against an independent computation.
    fn analytic_and_numeric_gradients_agree() {
        let analytic = quadratic_problem(true);
        let numeric = quadratic_problem(false);
        let a = ArgMinAdapter::new(&analytic);
        let n = ArgMinAdapter::new(&numeric);
        let z = array![0.4, -0.7];

        let ga = a.gradient(&z).expect("analytic gradient");
        let gn = n.gradient(&z).expect("numeric gradient");

        for i in 0..2 {
            assert_relative_eq!(ga[i], gn[i], epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // A non-finite objective value is an error carrying the value.
    fn non_finite_cost_is_rejected() {
        let problem = Problem::new(
            FunctionObjective::value_only(|_x: &Theta| f64::INFINITY),
            array![0.0],
            array![1.0],
        )
        .expect("valid");
        let adapter = ArgMinAdapter::new(&problem);

        let err = adapter.cost(&array![0.0]).expect_err("infinite cost");

        assert_eq!(OptError::from(err), OptError::NonFiniteCost { value: f64::INFINITY });
    }

    #[test]
    // Purpose
    // -------
    // A `NaN` solver coordinate is rejected before the objective runs.
    //
    // Given
    // -----
    // - A bounded quadratic with analytic gradient and `z = (NaN, 0)`.
    //
    // Expect
    // ------
    // - `cost` and `gradient` both fail with `NonFiniteSolverParam` at
    //   index 0.
    fn non_finite_solver_coordinates_are_rejected() {
        // Arrange
        let problem = quadratic_problem(true);
        let adapter = ArgMinAdapter::new(&problem);
        let z = array![f64::NAN, 0.0];

        // Act
        let cost_err = OptError::from(adapter.cost(&z).expect_err("NaN coordinate"));
        let grad_err = OptError::from(adapter.gradient(&z).expect_err("NaN coordinate"));

        // Assert
        for err in [cost_err, grad_err] {
            match err {
                OptError::NonFiniteSolverParam { index, value } => {
                    assert_eq!(index, 0);
                    assert!(value.is_nan());
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
