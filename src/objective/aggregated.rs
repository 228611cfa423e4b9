//! `AggregatedObjective`: sum of several objectives.
//!
//! The usual composition is a negative log-likelihood plus a
//! [`NegLogParameterPriors`](crate::objective::NegLogParameterPriors),
//! giving a negative log-posterior. Value, gradient and Hessian are plain
//! sums; a derivative is only available when every member provides it.
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

/// Sum of member objectives evaluated at the same parameter vector.
pub struct AggregatedObjective {
    objectives: Vec<Box<dyn Objective>>,
}

impl AggregatedObjective {
    /// # Errors
    /// [`OptError::EmptyAggregate`] if `objectives` is empty.
    pub fn new(objectives: Vec<Box<dyn Objective>>) -> OptResult<Self> {
        if objectives.is_empty() {
            return Err(OptError::EmptyAggregate);
        }
        Ok(Self { objectives })
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn push(&mut self, objective: Box<dyn Objective>) {
        self.objectives.push(objective);
    }
}

impl std::fmt::Debug for AggregatedObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatedObjective").field("members", &self.objectives.len()).finish()
    }
}

impl Objective for AggregatedObjective {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        self.objectives.iter().map(|o| o.value(x)).sum()
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        let mut total = Grad::zeros(x.len());
        for objective in &self.objectives {
            let g = objective.grad(x)?;
            validate_grad(&g, x.len())?;
            total += &g;
        }
        Ok(total)
    }

    fn hess(&self, x: &Theta) -> OptResult<Hessian> {
        let mut total = Hessian::zeros((x.len(), x.len()));
        for objective in &self.objectives {
            let h = objective.hess(x)?;
            validate_hessian(&h, x.len())?;
            total += &h;
        }
        Ok(total)
    }

    fn check(&self, x: &Theta) -> OptResult<()> {
        self.objectives.iter().try_for_each(|o| o.check(x))
    }
}
