//! Start-point generation for multi-start runs.
//!
//! User guesses come first (in the order given to the problem); the
//! remaining points are drawn uniformly from the free-parameter box.
//! Optionally, random points whose objective value is an error or
//! non-finite are redrawn.
use crate::{
    objective::Objective,
    optimization::{
        errors::{OptError, OptResult},
        local::Theta,
    },
    problem::Problem,
};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::warn;

/// Produce `n` start points in free coordinates.
///
/// - The first `min(n, guesses)` points are the problem's guesses; these
///   are never resampled.
/// - The rest are drawn coordinate-wise from `U[lb_i, ub_i]`.
/// - With `resample`, a drawn point whose value is an error or non-finite
///   is redrawn up to `max_resample` times.
///
/// # Errors
/// - [`OptError::UnboundedSampling`] when random points are needed and a
///   free parameter has an infinite bound (`index` is the full index).
/// - [`OptError::StartpointResampleExhausted`] when no acceptable point was
///   found within `1 + max_resample` draws.
pub fn uniform_startpoints<O: Objective, R: Rng + ?Sized>(
    problem: &Problem<O>, n: usize, rng: &mut R, resample: bool, max_resample: usize,
) -> OptResult<Vec<Theta>> {
    let mut points: Vec<Theta> = problem.x_guesses().into_iter().take(n).collect();
    if points.len() == n {
        return Ok(points);
    }

    let (lb, ub) = (problem.lb(), problem.ub());
    let mut dists = Vec::with_capacity(problem.dim());
    for (k, (&l, &u)) in lb.iter().zip(ub.iter()).enumerate() {
        if !(l.is_finite() && u.is_finite()) {
            return Err(OptError::UnboundedSampling {
                index: problem.x_free_indices()[k],
                lb: l,
                ub: u,
            });
        }
        dists.push(Uniform::new_inclusive(l, u));
    }
    let draw = |rng: &mut R| Theta::from_iter(dists.iter().map(|d| d.sample(rng)));

    while points.len() < n {
        let mut attempts = 1;
        let mut x = draw(rng);
        if resample {
            while !acceptable(problem, &x) {
                if attempts > max_resample {
                    return Err(OptError::StartpointResampleExhausted { attempts });
                }
                x = draw(rng);
                attempts += 1;
            }
            if attempts > 1 {
                warn!(start = points.len(), redraws = attempts - 1, "Start point resampled");
            }
        }
        points.push(x);
    }
    Ok(points)
}

fn acceptable<O: Objective>(problem: &Problem<O>, x: &Theta) -> bool {
    matches!(problem.value_free(x), Ok(v) if v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::FunctionObjective;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    fn sum_problem() -> Problem<FunctionObjective> {
        Problem::new(
            FunctionObjective::value_only(|x: &Theta| x.sum()),
            array![-1.0, 10.0, 0.0],
            array![1.0, 20.0, 5.0],
        )
        .expect("valid bounds")
    }

    #[test]
    // Purpose
    // -------
    // Guesses come first in free coordinates; random points respect the
    // bounds and depend only on the seed.
    //
    // Given
    // -----
    // - Parameter 2 fixed at 1.0, one full-dimension guess.
    //
    // Expect
    // ------
    // - First point is the guess without the fixed entry.
    // - All points are two-dimensional and inside the free box.
    // - Same seed, same points.
    fn guesses_first_then_seeded_uniform_draws() {
        // Arrange
        let problem = sum_problem()
            .with_fixed(vec![2], vec![1.0])
            .expect("valid fixing")
            .with_x_guesses(vec![array![0.5, 15.0, 1.0]])
            .expect("valid guess");

        // Act
        let a = uniform_startpoints(&problem, 4, &mut StdRng::seed_from_u64(11), true, 10)
            .expect("bounded");
        let b = uniform_startpoints(&problem, 4, &mut StdRng::seed_from_u64(11), true, 10)
            .expect("bounded");

        // Assert
        assert_eq!(a.len(), 4);
        assert_eq!(a[0], array![0.5, 15.0]);
        for x in &a {
            assert_eq!(x.len(), 2);
            assert!((-1.0..=1.0).contains(&x[0]));
            assert!((10.0..=20.0).contains(&x[1]));
        }
        assert_eq!(a, b);
    }

    #[test]
    // Purpose
    // -------
    // Infinite bounds only matter when random points are needed.
    fn unbounded_parameter_blocks_random_sampling_only() {
        let problem = Problem::new(
            FunctionObjective::value_only(|x: &Theta| x.sum()),
            array![0.0, 0.0],
            array![1.0, f64::INFINITY],
        )
        .expect("valid bounds")
        .with_x_guesses(vec![array![0.5, 3.0]])
        .expect("valid guess");
        let mut rng = StdRng::seed_from_u64(0);

        let only_guess = uniform_startpoints(&problem, 1, &mut rng, false, 1).expect("guess only");
        assert_eq!(only_guess.len(), 1);

        let err = uniform_startpoints(&problem, 2, &mut rng, false, 1).unwrap_err();
        assert!(matches!(err, OptError::UnboundedSampling { index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Resampling skips points where the objective is not finite and gives
    // up after the configured budget.
    fn resampling_redraws_and_then_gives_up() {
        let half_bad = Problem::new(
            FunctionObjective::value_only(|x: &Theta| if x[0] < 0.0 { f64::NAN } else { x[0] }),
            array![-1.0],
            array![1.0],
        )
        .expect("valid bounds");
        let mut rng = StdRng::seed_from_u64(3);
        let pts = uniform_startpoints(&half_bad, 20, &mut rng, true, 100).expect("resampled");
        assert!(pts.iter().all(|x| x[0] >= 0.0));

        let all_bad = Problem::new(
            FunctionObjective::value_only(|_x: &Theta| f64::INFINITY),
            array![-1.0],
            array![1.0],
        )
        .expect("valid bounds");
        let err = uniform_startpoints(&all_bad, 1, &mut rng, true, 5).unwrap_err();
        assert_eq!(err, OptError::StartpointResampleExhausted { attempts: 6 });

        let kept = uniform_startpoints(&all_bad, 2, &mut rng, false, 5).expect("no resampling");
        assert_eq!(kept.len(), 2);
    }
}
