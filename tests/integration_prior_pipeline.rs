//! Integration tests for the posterior workflow.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: a Rosenbrock negative log-likelihood,
//!   Gaussian log-priors attached per parameter, their aggregate as a
//!   negative log-posterior, bounded multi-start optimization, and SVG
//!   diagnostics.
//! - Check that priors actually move the optimum the way the closed forms
//!   predict.
//!
//! Coverage
//! --------
//! - `objective`: `FunctionObjective`, `NegLogParameterPriors`,
//!   `AggregatedObjective` with analytic and missing derivatives.
//! - `problem`: bounds, fixed parameters, names and guesses.
//! - `optimization::multistart`: seeded runs, both engines, Hessians.
//! - `visualize`: waterfall and parameter figures.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation and error conversions, covered by unit tests.
use approx::assert_relative_eq;
use ndarray::{Array1, array};
use rust_posterior::{
    AggregatedObjective, Engine, FunctionObjective, MultistartOptions, NegLogParameterPriors,
    Objective, PriorTerm, Problem, minimize,
    optimization::local::{LocalOptions, Tolerances},
    visualize::{ParametersOptions, WaterfallOptions, parameters, waterfall},
};
use statrs::distribution::{Continuous, Normal};
use std::f64::consts::PI;

/// Rosenbrock function with its analytic gradient.
fn rosenbrock(x: &Array1<f64>) -> (f64, Array1<f64>) {
    let n = x.len();
    let mut value = 0.0;
    let mut grad = Array1::zeros(n);
    for i in 0..n - 1 {
        let a = x[i + 1] - x[i] * x[i];
        let b = 1.0 - x[i];
        value += 100.0 * a * a + b * b;
        grad[i] += -400.0 * x[i] * a - 2.0 * b;
        grad[i + 1] += 200.0 * a;
    }
    (value, grad)
}

/// Gaussian log-prior terms `N(mean, std²)` on every parameter.
///
/// With `derivatives == false` the terms carry only the log-density, so
/// the optimizer has to difference the posterior numerically.
fn gaussian_priors(dim: usize, mean: f64, std: f64, derivatives: bool) -> NegLogParameterPriors {
    let normal = Normal::new(mean, std).expect("valid prior");
    let var = std * std;
    let terms = (0..dim)
        .map(|index| {
            let term = PriorTerm::new(index, move |v: f64| normal.ln_pdf(v));
            if derivatives {
                term.with_dx(move |v: f64| -(v - mean) / var).with_ddx(move |_v: f64| -1.0 / var)
            } else {
                term
            }
        })
        .collect();
    NegLogParameterPriors::new(terms)
}

fn posterior(dim: usize, mean: f64, std: f64, derivatives: bool) -> AggregatedObjective {
    AggregatedObjective::new(vec![
        Box::new(FunctionObjective::with_grad(rosenbrock)) as Box<dyn Objective>,
        Box::new(gaussian_priors(dim, mean, std, derivatives)),
    ])
    .expect("two members")
}

fn bounded(objective: AggregatedObjective, dim: usize) -> Problem<AggregatedObjective> {
    Problem::new(objective, Array1::from_elem(dim, -5.0), Array1::from_elem(dim, 5.0))
        .expect("valid bounds")
}

fn seeded(engine: Engine) -> MultistartOptions {
    MultistartOptions { engine, seed: Some(2024), ..MultistartOptions::default() }
}

#[test]
// Purpose
// -------
// The posterior value is the likelihood plus the negated log-prior.
//
// Given
// -----
// - Rosenbrock in 2D and N(0, 1) priors, evaluated at (0.3, −0.7).
//
// Expect
// ------
// - value = rosen(x) + Σ [½ ln(2π) + ½ x_i²]; the gradient adds x_i.
fn posterior_value_and_gradient_combine_terms() {
    // Arrange
    let post = posterior(2, 0.0, 1.0, true);
    let x = array![0.3, -0.7];
    let (rosen, rosen_grad) = rosenbrock(&x);

    // Act
    let value = post.value(&x).expect("finite value");
    let grad = post.grad(&x).expect("analytic gradient");

    // Assert
    let prior = 2.0 * 0.5 * (2.0 * PI).ln() + 0.5 * (0.09 + 0.49);
    assert_relative_eq!(value, rosen + prior, epsilon = 1e-10);
    assert_relative_eq!(grad[0], rosen_grad[0] + 0.3, epsilon = 1e-10);
    assert_relative_eq!(grad[1], rosen_grad[1] - 0.7, epsilon = 1e-10);
}

#[test]
// Purpose
// -------
// A prior centered on the likelihood optimum leaves the optimum in place
// and adds exactly its normalizing constant.
//
// Given
// -----
// - Rosenbrock in 2D, N(1, 1) priors, box [−5, 5]², 10 seeded starts.
//
// Expect
// ------
// - Best x ≈ (1, 1); best fval ≈ ln(2π); most starts converge.
fn prior_at_likelihood_optimum_keeps_optimum() {
    // Arrange
    let problem = bounded(posterior(2, 1.0, 1.0, true), 2);

    // Act
    let result = minimize(&problem, 10, &seeded(Engine::SingleCore)).expect("run succeeds");

    // Assert
    let best = result.best().expect("non-empty");
    let x = best.x.as_ref().expect("successful start");
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-3);
    assert_relative_eq!(x[1], 1.0, epsilon = 1e-3);
    assert_relative_eq!(best.fval, (2.0 * PI).ln(), epsilon = 1e-6);
    assert!(result.n_converged() > 0, "{}", result.summary());
    assert_eq!(result.len(), 10);
}

#[test]
// Purpose
// -------
// A tight prior at the origin pulls the optimum away from (1, 1).
//
// Given
// -----
// - Rosenbrock in 2D, N(0, 0.1²) priors.
//
// Expect
// ------
// - The best point is near the origin and strictly better than (1, 1)
//   under the posterior.
fn tight_prior_pulls_optimum_toward_origin() {
    let problem = bounded(posterior(2, 0.0, 0.1, true), 2);

    let result = minimize(&problem, 8, &seeded(Engine::SingleCore)).expect("run succeeds");

    let best = result.best().expect("non-empty");
    let x = best.x.as_ref().expect("successful start");
    assert!(x[0].abs() < 0.5 && x[1].abs() < 0.5, "best x = {x}");
    let at_likelihood_optimum = problem.objective().value(&array![1.0, 1.0]).expect("finite");
    assert!(best.fval < at_likelihood_optimum);
}

#[test]
// Purpose
// -------
// Priors without derivatives still optimize through the finite-difference
// fallback, and agree with the analytic run.
//
// Given
// -----
// - The gradient tolerance sits above the finite-difference noise floor.
fn priors_without_derivatives_match_analytic_run() {
    let analytic = bounded(posterior(2, 0.0, 0.5, true), 2);
    let numeric = bounded(posterior(2, 0.0, 0.5, false), 2);
    assert!(numeric.objective().grad(&array![0.0, 0.0]).is_err());
    let tols = Tolerances::new(Some(1e-6), Some(1e-12), Some(1000)).expect("valid tolerances");
    let opts = MultistartOptions {
        local: LocalOptions { tols, ..LocalOptions::default() },
        ..seeded(Engine::SingleCore)
    };

    let ra = minimize(&analytic, 6, &opts).expect("analytic run");
    let rn = minimize(&numeric, 6, &opts).expect("numeric run");

    let xa = ra.best().and_then(|r| r.x.clone()).expect("analytic optimum");
    let xn = rn.best().and_then(|r| r.x.clone()).expect("numeric optimum");
    assert_relative_eq!(xa[0], xn[0], epsilon = 1e-3);
    assert_relative_eq!(xa[1], xn[1], epsilon = 1e-3);
    assert_relative_eq!(ra.fvals()[0], rn.fvals()[0], epsilon = 1e-6);
}

#[test]
// Purpose
// -------
// Sequential and parallel engines give the same records for a seed.
fn engines_agree_on_posterior_run() {
    let problem = bounded(posterior(3, 0.0, 1.0, true), 3);

    let seq = minimize(&problem, 6, &seeded(Engine::SingleCore)).expect("sequential");
    let par = minimize(&problem, 6, &seeded(Engine::MultiThread { n_threads: Some(2) }))
        .expect("parallel");

    let ids = |r: &rust_posterior::OptimizeResult| -> Vec<String> {
        r.iter().map(|o| o.id.clone()).collect()
    };
    assert_eq!(ids(&seq), ids(&par));
    assert_eq!(seq.fvals(), par.fvals());
}

#[test]
// Purpose
// -------
// Fixed parameters, guesses, Hessians and both figures work together.
//
// Given
// -----
// - 3D posterior with x₂ fixed at 1, one user guess, Hessians requested.
//
// Expect
// ------
// - Start "0" begins at the guess; results are full dimension with the
//   fixed value in place; Hessians are 2×2 and symmetric.
// - Both SVG files are written and mention the free parameter names.
fn fixed_parameters_hessians_and_figures() {
    // Arrange
    let problem = bounded(posterior(3, 0.0, 1.0, true), 3)
        .with_fixed(vec![2], vec![1.0])
        .expect("valid fixing")
        .with_x_names(vec!["alpha", "beta", "gamma"])
        .expect("valid names")
        .with_x_guesses(vec![array![0.5, 0.5, 1.0]])
        .expect("valid guess");
    let opts = MultistartOptions { compute_hessian: true, ..seeded(Engine::SingleCore) };
    let dir = tempfile::tempdir().expect("temp dir");

    // Act
    let result = minimize(&problem, 5, &opts).expect("run succeeds");
    waterfall(&result, dir.path().join("waterfall.svg"), &WaterfallOptions::default())
        .expect("waterfall written");
    parameters(&problem, &result, dir.path().join("parameters.svg"), &ParametersOptions::default())
        .expect("parameters written");

    // Assert
    let first = result.iter().find(|r| r.id == "0").expect("start 0");
    assert_eq!(first.x0, array![0.5, 0.5, 1.0]);
    let best = result.best().expect("non-empty");
    let x = best.x.as_ref().expect("successful start");
    assert_eq!(x.len(), 3);
    assert_eq!(x[2], 1.0);
    let h = best.hess.as_ref().expect("hessian requested");
    assert_eq!(h.dim(), (2, 2));
    assert_relative_eq!(h[[0, 1]], h[[1, 0]], epsilon = 1e-9);
    assert!(h[[0, 0]] > 0.0 && h[[1, 1]] > 0.0);

    let svg = std::fs::read_to_string(dir.path().join("parameters.svg")).expect("readable");
    assert!(svg.contains("alpha") && svg.contains("beta"));
    assert!(!svg.contains("gamma"));
    assert!(dir.path().join("waterfall.svg").exists());
    assert!(result.summary().contains("Best start"));
}
