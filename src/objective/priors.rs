//! Negative log-prior over individual parameters.
//!
//! Purpose
//! -------
//! Turn a list of per-parameter log-densities into an [`Objective`] that
//! can be summed with a negative log-likelihood to form a negative
//! log-posterior.
//!
//! Key behaviors
//! -------------
//! - Each [`PriorTerm`] names one parameter index and carries the
//!   log-density `log p(x_i)` of that parameter, plus optionally its first
//!   and second derivatives.
//! - [`NegLogParameterPriors`] evaluates `-Σ_k log p_k(x[index_k])`; the
//!   sign is flipped here so that aggregation is a plain sum.
//! - The gradient is available when every term has a first derivative, the
//!   (diagonal) Hessian when every term has a second derivative. Otherwise
//!   the optimizer differentiates numerically.
//!
//! Invariants & assumptions
//! ------------------------
//! - Several terms may target the same index; their contributions add up.
//! - Parameters without a term contribute nothing (flat prior).
//! - Indices refer to the **full** parameter vector of the problem,
//!   including fixed parameters.
//!
//! Testing notes
//! -------------
//! - Unit tests check value, gradient and Hessian of Gaussian priors
//!   against closed forms, the missing-derivative fallbacks, and index
//!   validation.
use std::sync::Arc;

use ndarray::Array2;

use crate::{
    objective::traits::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::types::{Cost, Grad, Hessian, Theta},
    },
};

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Prior on a single parameter.
///
/// - `index`: position in the full parameter vector.
/// - `density`: log-density `log p(x)`.
/// - `density_dx`: `d/dx log p(x)`, optional.
/// - `density_ddx`: `d²/dx² log p(x)`, optional.
#[derive(Clone)]
pub struct PriorTerm {
    index: usize,
    density: ScalarFn,
    density_dx: Option<ScalarFn>,
    density_ddx: Option<ScalarFn>,
}

impl PriorTerm {
    pub fn new<F>(index: usize, density: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { index, density: Arc::new(density), density_dx: None, density_ddx: None }
    }

    pub fn with_dx<F>(mut self, density_dx: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.density_dx = Some(Arc::new(density_dx));
        self
    }

    pub fn with_ddx<F>(mut self, density_ddx: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.density_ddx = Some(Arc::new(density_ddx));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn has_dx(&self) -> bool {
        self.density_dx.is_some()
    }

    pub fn has_ddx(&self) -> bool {
        self.density_ddx.is_some()
    }
}

impl std::fmt::Debug for PriorTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorTerm")
            .field("index", &self.index)
            .field("has_dx", &self.has_dx())
            .field("has_ddx", &self.has_ddx())
            .finish()
    }
}

/// Negative log-prior `-Σ_k log p_k(x[index_k])`.
#[derive(Debug, Clone, Default)]
pub struct NegLogParameterPriors {
    terms: Vec<PriorTerm>,
}

impl NegLogParameterPriors {
    pub fn new(terms: Vec<PriorTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[PriorTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of the log-prior densities, `Σ_k log p_k(x[index_k])`.
    ///
    /// # Errors
    /// [`OptError::PriorIndexOutOfBounds`] for a term outside `x`.
    pub fn log_density(&self, x: &Theta) -> OptResult<f64> {
        self.check(x)?;
        Ok(self.terms.iter().map(|t| (t.density)(x[t.index])).sum())
    }
}

impl Objective for NegLogParameterPriors {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        Ok(-self.log_density(x)?)
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        self.check(x)?;
        let mut grad = Grad::zeros(x.len());
        for term in &self.terms {
            let dx = term.density_dx.as_ref().ok_or(OptError::GradientNotImplemented)?;
            grad[term.index] -= dx(x[term.index]);
        }
        Ok(grad)
    }

    fn hess(&self, x: &Theta) -> OptResult<Hessian> {
        self.check(x)?;
        let mut hess = Array2::zeros((x.len(), x.len()));
        for term in &self.terms {
            let ddx = term.density_ddx.as_ref().ok_or(OptError::HessianNotImplemented)?;
            hess[[term.index, term.index]] -= ddx(x[term.index]);
        }
        Ok(hess)
    }

    fn check(&self, x: &Theta) -> OptResult<()> {
        match self.terms.iter().find(|t| t.index >= x.len()) {
            Some(t) => Err(OptError::PriorIndexOutOfBounds { index: t.index, dim: x.len() }),
            None => Ok(()),
        }
    }
}
