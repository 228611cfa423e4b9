//! problem: an objective together with its parameter space.
//!
//! Purpose
//! -------
//! Bundle an [`Objective`] with box constraints, optional fixed
//! parameters, parameter names and user start guesses, and translate
//! between the full parameter vector (seen by the objective) and the free
//! parameter vector (seen by the optimizer).
//!
//! Key behaviors
//! -------------
//! - [`Problem::new`] validates the bounds; `with_*` builders add fixed
//!   parameters, names and guesses, each validated on entry.
//! - [`Problem::full_vector`] / [`Problem::free_vector`] insert and drop
//!   fixed values, rejecting vectors of the wrong length.
//! - [`Problem::value_free`] / [`Problem::grad_free`] evaluate the
//!   objective from free coordinates.
//! - [`bounds::BoundTransform`] maps free coordinates to the unconstrained
//!   space the solver works in.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lb[i] < ub[i]` for every parameter, neither is `NaN`, and a finite
//!   interval has finite width. Infinite bounds are allowed.
//! - At least one parameter is free.
//! - Fixed values and guesses lie within their bounds.
//!
//! Conventions
//! -----------
//! - "full" accessors use the objective's dimension; unprefixed accessors
//!   (`dim`, `lb`, `ub`) use the free dimension.
//! - Default parameter names are `x0`, `x1`, ...

pub mod bounds;
pub mod errors;

use crate::{
    objective::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::types::{Cost, Grad, Theta},
    },
};

use self::{
    bounds::BoundTransform,
    errors::{ProblemError, ProblemResult},
};

/// Objective plus parameter space.
#[derive(Debug, Clone)]
pub struct Problem<O: Objective> {
    objective: O,
    lb_full: Theta,
    ub_full: Theta,
    x_fixed_indices: Vec<usize>,
    x_fixed_vals: Vec<f64>,
    x_free_indices: Vec<usize>,
    x_names: Vec<String>,
    x_guesses_full: Vec<Theta>,
}

impl<O: Objective> Problem<O> {
    /// Create a problem with all parameters free.
    ///
    /// # Errors
    /// - [`ProblemError::EmptyBounds`] for zero parameters.
    /// - [`ProblemError::BoundsLengthMismatch`] when `lb` and `ub` differ in length.
    /// - [`ProblemError::InvalidBounds`] for `NaN`, `lb >= ub`, or an
    ///   interval too wide to represent.
    pub fn new(objective: O, lb: Theta, ub: Theta) -> ProblemResult<Self> {
        if lb.len() != ub.len() {
            return Err(ProblemError::BoundsLengthMismatch { lb: lb.len(), ub: ub.len() });
        }
        if lb.is_empty() {
            return Err(ProblemError::EmptyBounds);
        }
        for (index, (&l, &u)) in lb.iter().zip(ub.iter()).enumerate() {
            let reason = if l.is_nan() || u.is_nan() {
                Some("Bounds must not be NaN.")
            } else if l >= u {
                Some("Lower bound must be strictly below the upper bound.")
            } else if l.is_finite() && u.is_finite() && !(u - l).is_finite() {
                Some("Bound width must be finite.")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ProblemError::InvalidBounds { index, lb: l, ub: u, reason });
            }
        }
        let dim_full = lb.len();
        Ok(Self {
            objective,
            lb_full: lb,
            ub_full: ub,
            x_fixed_indices: Vec::new(),
            x_fixed_vals: Vec::new(),
            x_free_indices: (0..dim_full).collect(),
            x_names: (0..dim_full).map(|i| format!("x{i}")).collect(),
            x_guesses_full: Vec::new(),
        })
    }

    /// Fix parameters to constant values.
    ///
    /// Replaces any previously fixed set.
    pub fn with_fixed(mut self, indices: Vec<usize>, values: Vec<f64>) -> ProblemResult<Self> {
        if indices.len() != values.len() {
            return Err(ProblemError::FixedLengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        let dim_full = self.dim_full();
        let mut seen = vec![false; dim_full];
        for (&index, &value) in indices.iter().zip(values.iter()) {
            if index >= dim_full {
                return Err(ProblemError::FixedIndexOutOfRange { index, dim: dim_full });
            }
            if seen[index] {
                return Err(ProblemError::DuplicateFixedIndex { index });
            }
            seen[index] = true;
            if !(value >= self.lb_full[index] && value <= self.ub_full[index]) || !value.is_finite() {
                return Err(ProblemError::FixedValueOutOfBounds { index, value });
            }
        }
        if indices.len() == dim_full {
            return Err(ProblemError::NoFreeParameters);
        }
        self.x_free_indices = (0..dim_full).filter(|i| !seen[*i]).collect();
        self.x_fixed_indices = indices;
        self.x_fixed_vals = values;
        Ok(self)
    }

    /// Name the parameters (full dimension).
    pub fn with_x_names<S: Into<String>>(mut self, names: Vec<S>) -> ProblemResult<Self> {
        if names.len() != self.dim_full() {
            return Err(ProblemError::NamesLengthMismatch {
                expected: self.dim_full(),
                found: names.len(),
            });
        }
        self.x_names = names.into_iter().map(Into::into).collect();
        Ok(self)
    }

    /// Add user start points (full dimension), used before random ones.
    pub fn with_x_guesses(mut self, guesses: Vec<Theta>) -> ProblemResult<Self> {
        for (guess, x) in guesses.iter().enumerate() {
            if x.len() != self.dim_full() {
                return Err(ProblemError::GuessLengthMismatch {
                    guess,
                    expected: self.dim_full(),
                    found: x.len(),
                });
            }
            for (index, &value) in x.iter().enumerate() {
                if !(value.is_finite() && value >= self.lb_full[index] && value <= self.ub_full[index])
                {
                    return Err(ProblemError::GuessOutOfBounds { guess, index, value });
                }
            }
        }
        self.x_guesses_full = guesses;
        Ok(self)
    }

    // ---- Accessors ----

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Number of free parameters.
    pub fn dim(&self) -> usize {
        self.x_free_indices.len()
    }

    pub fn dim_full(&self) -> usize {
        self.lb_full.len()
    }

    pub fn lb_full(&self) -> &Theta {
        &self.lb_full
    }

    pub fn ub_full(&self) -> &Theta {
        &self.ub_full
    }

    /// Lower bounds of the free parameters.
    pub fn lb(&self) -> Theta {
        self.drop_fixed(&self.lb_full)
    }

    /// Upper bounds of the free parameters.
    pub fn ub(&self) -> Theta {
        self.drop_fixed(&self.ub_full)
    }

    pub fn x_free_indices(&self) -> &[usize] {
        &self.x_free_indices
    }

    pub fn x_fixed_indices(&self) -> &[usize] {
        &self.x_fixed_indices
    }

    pub fn x_fixed_vals(&self) -> &[f64] {
        &self.x_fixed_vals
    }

    pub fn x_names(&self) -> &[String] {
        &self.x_names
    }

    pub fn x_guesses_full(&self) -> &[Theta] {
        &self.x_guesses_full
    }

    /// User guesses restricted to the free parameters.
    pub fn x_guesses(&self) -> Vec<Theta> {
        self.x_guesses_full.iter().map(|g| self.drop_fixed(g)).collect()
    }

    /// Bound transform for the free parameters.
    pub fn bound_transform(&self) -> BoundTransform {
        BoundTransform::new(&self.lb(), &self.ub())
    }

    // ---- Free / full mapping ----

    /// Insert fixed values into a free-parameter vector.
    ///
    /// # Errors
    /// [`OptError::ThetaLengthMismatch`] unless `x_free` has [`Self::dim`]
    /// entries.
    pub fn full_vector(&self, x_free: &Theta) -> OptResult<Theta> {
        check_len(x_free, self.dim())?;
        Ok(self.insert_fixed(x_free))
    }

    /// Drop fixed entries from a full-dimension vector.
    ///
    /// # Errors
    /// [`OptError::ThetaLengthMismatch`] unless `x_full` has
    /// [`Self::dim_full`] entries.
    pub fn free_vector(&self, x_full: &Theta) -> OptResult<Theta> {
        check_len(x_full, self.dim_full())?;
        Ok(self.drop_fixed(x_full))
    }

    /// Objective value at free coordinates.
    pub fn value_free(&self, x_free: &Theta) -> OptResult<Cost> {
        self.objective.value(&self.full_vector(x_free)?)
    }

    /// Objective gradient at free coordinates, restricted to free entries.
    pub fn grad_free(&self, x_free: &Theta) -> OptResult<Grad> {
        let full = self.objective.grad(&self.full_vector(x_free)?)?;
        if full.len() != self.dim_full() {
            return Err(OptError::GradientDimMismatch {
                expected: self.dim_full(),
                found: full.len(),
            });
        }
        Ok(self.drop_fixed(&full))
    }

    // `x_free` has `dim()` entries.
    fn insert_fixed(&self, x_free: &Theta) -> Theta {
        let mut full = Theta::zeros(self.dim_full());
        for (&i, &v) in self.x_free_indices.iter().zip(x_free.iter()) {
            full[i] = v;
        }
        for (&i, &v) in self.x_fixed_indices.iter().zip(self.x_fixed_vals.iter()) {
            full[i] = v;
        }
        full
    }

    // `x_full` has `dim_full()` entries.
    fn drop_fixed(&self, x_full: &Theta) -> Theta {
        Theta::from_iter(self.x_free_indices.iter().map(|&i| x_full[i]))
    }
}

fn check_len(x: &Theta, expected: usize) -> OptResult<()> {
    if x.len() != expected {
        return Err(OptError::ThetaLengthMismatch { expected, actual: x.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::FunctionObjective;
    use ndarray::array;

    fn linear() -> FunctionObjective {
        FunctionObjective::with_grad(|x: &Theta| (x.sum(), Theta::ones(x.len())))
    }

    #[test]
    // Purpose
    // -------
    // Bounds are validated coordinate by coordinate.
    fn new_validates_bounds() {
        assert!(matches!(
            Problem::new(linear(), array![0.0], array![1.0, 2.0]),
            Err(ProblemError::BoundsLengthMismatch { lb: 1, ub: 2 })
        ));
        assert!(matches!(
            Problem::new(linear(), Theta::zeros(0), Theta::zeros(0)),
            Err(ProblemError::EmptyBounds)
        ));
        assert!(matches!(
            Problem::new(linear(), array![0.0, 3.0], array![1.0, 3.0]),
            Err(ProblemError::InvalidBounds { index: 1, .. })
        ));
        assert!(matches!(
            Problem::new(linear(), array![f64::NAN], array![1.0]),
            Err(ProblemError::InvalidBounds { index: 0, .. })
        ));
        assert!(matches!(
            Problem::new(linear(), array![-f64::MAX], array![f64::MAX]),
            Err(ProblemError::InvalidBounds { index: 0, .. })
        ));
        assert!(Problem::new(linear(), array![f64::NEG_INFINITY], array![f64::INFINITY]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Fixed parameters are inserted into full vectors and excluded from
    // free bounds and gradients.
    //
    // Given
    // -----
    // - Three parameters, x₁ fixed to 0.5.
    //
    // Expect
    // ------
    // - dim 2, free bounds of x₀ and x₂, full vector with 0.5 in the middle.
    fn fixed_parameters_map_between_free_and_full() {
        let problem = Problem::new(linear(), array![-1.0, 0.0, -3.0], array![1.0, 1.0, 3.0])
            .and_then(|p| p.with_fixed(vec![1], vec![0.5]))
            .expect("valid problem");

        assert_eq!(problem.dim(), 2);
        assert_eq!(problem.dim_full(), 3);
        assert_eq!(problem.lb(), array![-1.0, -3.0]);
        assert_eq!(problem.full_vector(&array![0.25, 2.0]), Ok(array![0.25, 0.5, 2.0]));
        assert_eq!(problem.free_vector(&array![0.25, 0.5, 2.0]), Ok(array![0.25, 2.0]));
        assert_eq!(problem.value_free(&array![0.25, 2.0]), Ok(2.75));
        assert_eq!(problem.grad_free(&array![0.25, 2.0]), Ok(array![1.0, 1.0]));
    }

    #[test]
    // Purpose
    // -------
    // Vectors of the wrong length are rejected instead of being padded or
    // indexed out of range.
    //
    // Given
    // -----
    // - Three free parameters and one-entry vectors.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` from every free/full mapping and evaluation.
    fn wrong_length_vectors_are_rejected() {
        // Arrange
        let problem = Problem::new(linear(), array![-1.0, -1.0, -1.0], array![1.0, 1.0, 1.0])
            .expect("valid problem");
        let short = array![0.5];
        let mismatch = OptError::ThetaLengthMismatch { expected: 3, actual: 1 };

        // Act & Assert
        assert_eq!(problem.full_vector(&short), Err(mismatch.clone()));
        assert_eq!(problem.free_vector(&short), Err(mismatch.clone()));
        assert_eq!(problem.value_free(&short), Err(mismatch.clone()));
        assert_eq!(problem.grad_free(&short), Err(mismatch));
        assert_eq!(
            problem.free_vector(&array![0.1, 0.2, 0.3, 0.4]),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 4 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Fixing rejects bad indices, duplicates, out-of-bounds values and
    // fixing everything.
    fn with_fixed_rejects_invalid_sets() {
        let base = || Problem::new(linear(), array![0.0, 0.0], array![1.0, 1.0]).expect("valid");

        assert!(matches!(
            base().with_fixed(vec![0], vec![]),
            Err(ProblemError::FixedLengthMismatch { .. })
        ));
        assert!(matches!(
            base().with_fixed(vec![2], vec![0.5]),
            Err(ProblemError::FixedIndexOutOfRange { index: 2, dim: 2 })
        ));
        assert!(matches!(
            base().with_fixed(vec![0, 0], vec![0.5, 0.5]),
            Err(ProblemError::DuplicateFixedIndex { index: 0 })
        ));
        assert!(matches!(
            base().with_fixed(vec![1], vec![1.5]),
            Err(ProblemError::FixedValueOutOfBounds { index: 1, .. })
        ));
        assert!(matches!(
            base().with_fixed(vec![0, 1], vec![0.5, 0.5]),
            Err(ProblemError::NoFreeParameters)
        ));
    }

    #[test]
    // Purpose
    // -------
    // Names default to `x{i}`; guesses are validated and reduced to free
    // coordinates.
    fn names_and_guesses() {
        let problem = Problem::new(linear(), array![0.0, 0.0], array![1.0, 1.0]).expect("valid");
        assert_eq!(problem.x_names(), &["x0".to_string(), "x1".to_string()]);

        let problem = problem
            .with_x_names(vec!["k1", "k2"])
            .and_then(|p| p.with_fixed(vec![0], vec![0.1]))
            .and_then(|p| p.with_x_guesses(vec![array![0.1, 0.9]]))
            .expect("valid names and guesses");
        assert_eq!(problem.x_names()[1], "k2");
        assert_eq!(problem.x_guesses(), vec![array![0.9]]);

        let problem = problem.with_x_guesses(Vec::new()).expect("clearing guesses is valid");
        assert!(problem.x_guesses().is_empty());

        let problem_short = Problem::new(linear(), array![0.0, 0.0], array![1.0, 1.0]).expect("valid");
        assert!(matches!(
            problem_short.with_x_guesses(vec![array![0.5]]),
            Err(ProblemError::GuessLengthMismatch { guess: 0, expected: 2, found: 1 })
        ));
        assert!(matches!(
            problem.with_x_guesses(vec![array![0.5, 2.0]]),
            Err(ProblemError::GuessOutOfBounds { guess: 0, index: 1, .. })
        ));
    }
}
