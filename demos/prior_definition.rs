//! Attach Gaussian log-priors to a Rosenbrock negative log-likelihood,
//! optimize the resulting posterior from many starts and plot the result.
//!
//! Run with
//!
//! ```text
//! cargo run --example prior_definition
//! ```
//!
//! Environment:
//! - `RUST_POSTERIOR_STARTS`: number of starts (default 20).
//! - `RUST_POSTERIOR_OUT`: output directory for the SVG figures
//!   (default `target/prior_definition`).
//! - `RUST_POSTERIOR_VERBOSE`: set to `1` for per-start debug events.
use anyhow::{Context, Result};
use ndarray::{Array1, array};
use rust_posterior::{
    AggregatedObjective, Engine, FunctionObjective, MultistartOptions, NegLogParameterPriors,
    Objective, PriorTerm, Problem, minimize,
    visualize::{ParametersOptions, WaterfallOptions, parameters, waterfall},
};
use statrs::distribution::{Continuous, Normal};
use std::{env, fs, path::PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

const DIM: usize = 2;
const PRIOR_MEAN: f64 = 0.0;
const PRIOR_STD: f64 = 1.0;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

/// Rosenbrock function and its gradient, the negative log-likelihood.
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

/// One Gaussian log-prior term per parameter, with both derivatives.
fn gaussian_priors(dim: usize, mean: f64, std: f64) -> Result<NegLogParameterPriors> {
    let normal = Normal::new(mean, std).context("invalid prior parameters")?;
    let var = std * std;
    let terms = (0..dim)
        .map(|index| {
            PriorTerm::new(index, move |v: f64| normal.ln_pdf(v))
                .with_dx(move |v: f64| -(v - mean) / var)
                .with_ddx(move |_v: f64| -1.0 / var)
        })
        .collect();
    Ok(NegLogParameterPriors::new(terms))
}

fn main() -> Result<()> {
    let verbose = env::var("RUST_POSTERIOR_VERBOSE").is_ok_and(|v| v == "1");
    setup_logging(verbose)?;
    let n_starts: usize = match env::var("RUST_POSTERIOR_STARTS") {
        Ok(s) => s.parse().context("RUST_POSTERIOR_STARTS must be a positive integer")?,
        Err(_) => 20,
    };
    let out_dir = env::var("RUST_POSTERIOR_OUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("target/prior_definition"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    // Likelihood, priors, posterior.
    let nllh = FunctionObjective::with_grad(rosenbrock);
    let priors = gaussian_priors(DIM, PRIOR_MEAN, PRIOR_STD)?;
    let posterior =
        AggregatedObjective::new(vec![Box::new(nllh) as Box<dyn Objective>, Box::new(priors)])?;

    let lb = Array1::from_elem(DIM, -5.0);
    let ub = Array1::from_elem(DIM, 5.0);
    let problem = Problem::new(posterior, lb, ub)?
        .with_x_names((0..DIM).map(|i| format!("x_{i}")).collect::<Vec<String>>())?
        .with_x_guesses(vec![array![-1.0, 1.0]])?;

    let opts = MultistartOptions {
        engine: Engine::MultiThread { n_threads: None },
        seed: Some(1912),
        ..MultistartOptions::default()
    };
    let result = minimize(&problem, n_starts, &opts)?;
    println!("{}", result.summary());

    let waterfall_path = out_dir.join("waterfall.svg");
    waterfall(&result, &waterfall_path, &WaterfallOptions::default())?;
    let parameters_path = out_dir.join("parameters.svg");
    parameters(&problem, &result, &parameters_path, &ParametersOptions::default())?;
    info!(
        waterfall = %waterfall_path.display(),
        parameters = %parameters_path.display(),
        "Figures written"
    );
    Ok(())
}
