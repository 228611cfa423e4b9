//! Bound handling through a change of variables.
//!
//! Purpose
//! -------
//! The L-BFGS solver is unconstrained. Box constraints are enforced by
//! optimizing over `z ∈ ℝⁿ` and mapping each coordinate into its interval:
//!
//! | bounds           | `x(z)`                     | `dx/dz`                 |
//! |------------------|----------------------------|-------------------------|
//! | `[lb, ub]`       | `lb + (ub − lb)·σ(z)`      | `(ub − lb)·σ(z)(1−σ(z))`|
//! | `[lb, ∞)`        | `lb + softplus(z)`         | `σ(z)`                  |
//! | `(−∞, ub]`       | `ub − softplus(z)`         | `−σ(z)`                 |
//! | `(−∞, ∞)`        | `z`                        | `1`                     |
//!
//! Invariants & assumptions
//! ------------------------
//! - `x(z)` lies in the open box for every finite `z` (up to `f64`
//!   saturation far in the tails).
//! - [`BoundTransform::to_unconstrained`] accepts points on or beyond a
//!   bound and pulls them inside by [`BOUND_MARGIN`] first.
//! - Bounds were validated by the problem (`lb < ub`, finite width).
use crate::optimization::{
    local::types::Theta,
    numerical_stability::{BOUND_MARGIN, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum BoundKind {
    Interval { lb: f64, ub: f64 },
    Lower { lb: f64 },
    Upper { ub: f64 },
    Unbounded,
}

impl BoundKind {
    fn new(lb: f64, ub: f64) -> Self {
        match (lb.is_finite(), ub.is_finite()) {
            (true, true) => BoundKind::Interval { lb, ub },
            (true, false) => BoundKind::Lower { lb },
            (false, true) => BoundKind::Upper { ub },
            (false, false) => BoundKind::Unbounded,
        }
    }
}

/// Coordinate-wise bijection between ℝⁿ and a (possibly half-open) box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundTransform {
    kinds: Vec<BoundKind>,
}

impl BoundTransform {
    /// Build the transform for the free-parameter bounds `lb`, `ub`.
    pub fn new(lb: &Theta, ub: &Theta) -> Self {
        let kinds = lb.iter().zip(ub.iter()).map(|(&l, &u)| BoundKind::new(l, u)).collect();
        Self { kinds }
    }

    pub fn dim(&self) -> usize {
        self.kinds.len()
    }

    /// Map unconstrained `z` into the box.
    pub fn to_box(&self, z: &Theta) -> Theta {
        Theta::from_iter(self.kinds.iter().zip(z.iter()).map(|(kind, &zi)| match *kind {
            BoundKind::Interval { lb, ub } => lb + (ub - lb) * safe_logistic(zi),
            BoundKind::Lower { lb } => lb + safe_softplus(zi),
            BoundKind::Upper { ub } => ub - safe_softplus(zi),
            BoundKind::Unbounded => zi,
        }))
    }

    /// Map a box point to unconstrained coordinates.
    ///
    /// Points closer to a finite bound than the margin are pulled inside
    /// first, so the result is always finite.
    pub fn to_unconstrained(&self, x: &Theta) -> Theta {
        Theta::from_iter(self.kinds.iter().zip(x.iter()).map(|(kind, &xi)| match *kind {
            BoundKind::Interval { lb, ub } => {
                let p = ((xi - lb) / (ub - lb)).clamp(BOUND_MARGIN, 1.0 - BOUND_MARGIN);
                safe_logit(p)
            }
            BoundKind::Lower { lb } => safe_softplus_inv((xi - lb).max(margin(lb))),
            BoundKind::Upper { ub } => safe_softplus_inv((ub - xi).max(margin(ub))),
            BoundKind::Unbounded => xi,
        }))
    }

    /// Diagonal of the Jacobian `dx/dz` at `z`.
    ///
    /// Used for the chain rule `∂f/∂z = ∂f/∂x ⊙ dx/dz`.
    pub fn jacobian_diag(&self, z: &Theta) -> Theta {
        Theta::from_iter(self.kinds.iter().zip(z.iter()).map(|(kind, &zi)| match *kind {
            BoundKind::Interval { lb, ub } => {
                let s = safe_logistic(zi);
                (ub - lb) * s * (1.0 - s)
            }
            BoundKind::Lower { .. } => safe_logistic(zi),
            BoundKind::Upper { .. } => -safe_logistic(zi),
            BoundKind::Unbounded => 1.0,
        }))
    }
}

fn margin(bound: f64) -> f64 {
    BOUND_MARGIN * bound.abs().max(1.0)
}
