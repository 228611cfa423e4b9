//! Parameter plot: final values of the best starts, one row per free
//! parameter, with the bounds marked.
use crate::{
    objective::Objective,
    optimization::local::Theta,
    problem::Problem,
    result::OptimizeResult,
    visualize::{
        errors::{PlotError, PlotResult},
        padded_range, validate_size,
    },
};
use plotters::prelude::*;
use std::path::Path;

/// Figure options for [`parameters`].
///
/// Default: 800 × 600, title `"Estimated parameters"`, the best 10 starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametersOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Number of best finite starts drawn; `None` draws all of them.
    pub n_best: Option<usize>,
}

impl ParametersOptions {
    /// # Errors
    /// [`PlotError::InvalidOptions`] for a zero-sized figure or
    /// `n_best == Some(0)`.
    pub fn new(
        width: u32, height: u32, title: impl Into<String>, n_best: Option<usize>,
    ) -> PlotResult<Self> {
        let opts = Self { width, height, title: title.into(), n_best };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> PlotResult<()> {
        validate_size(self.width, self.height)?;
        if self.n_best == Some(0) {
            return Err(PlotError::InvalidOptions { reason: "n_best must be greater than zero" });
        }
        Ok(())
    }
}

impl Default for ParametersOptions {
    fn default() -> Self {
        Self { width: 800, height: 600, title: "Estimated parameters".to_string(), n_best: Some(10) }
    }
}

/// Free-parameter values of the best finite starts, best first.
///
/// # Errors
/// - [`PlotError::NoFiniteResults`] when no start has a finite value.
/// - [`PlotError::DimensionMismatch`] when a result vector is not full
///   dimension for `problem`.
pub fn best_free_parameters<O: Objective>(
    problem: &Problem<O>, result: &OptimizeResult, n_best: Option<usize>,
) -> PlotResult<Vec<Theta>> {
    let limit = n_best.unwrap_or(usize::MAX);
    let xs: Vec<&Theta> =
        result.iter().filter(|r| r.is_finite()).filter_map(|r| r.x.as_ref()).take(limit).collect();
    if xs.is_empty() {
        return Err(PlotError::NoFiniteResults);
    }
    xs.into_iter()
        .map(|x| {
            problem.free_vector(x).map_err(|_| PlotError::DimensionMismatch {
                expected: problem.dim_full(),
                found: x.len(),
            })
        })
        .collect()
}

/// Write a parameter plot of `result` to an SVG file at `path`.
///
/// Each start is a polyline across the free parameters, the best start
/// drawn last (on top). Finite bounds are drawn as black crosses.
///
/// # Errors
/// - [`PlotError::InvalidOptions`] from option validation.
/// - Errors of [`best_free_parameters`].
/// - [`PlotError::Backend`] for drawing or I/O failures.
pub fn parameters<O: Objective, P: AsRef<Path>>(
    problem: &Problem<O>, result: &OptimizeResult, path: P, opts: &ParametersOptions,
) -> PlotResult<()> {
    opts.validate()?;
    let xs = best_free_parameters(problem, result, opts.n_best)?;
    let names: Vec<String> =
        problem.x_free_indices().iter().map(|&i| problem.x_names()[i].clone()).collect();
    let (lb, ub) = (problem.lb(), problem.ub());
    let bounds: Vec<(f64, i32)> = (0..problem.dim())
        .flat_map(|k| [(lb[k], k as i32), (ub[k], k as i32)])
        .filter(|(v, _)| v.is_finite())
        .collect();
    let (x0, x1) =
        padded_range(xs.iter().flat_map(|x| x.iter().copied()).chain(bounds.iter().map(|b| b.0)));
    let n_rows = problem.dim() as i32;

    let root = SVGBackend::new(path.as_ref(), (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&opts.title, ("sans-serif", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, -1..n_rows)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Parameter value")
        .y_desc("Parameter")
        .y_labels(names.len() + 2)
        .y_label_formatter(&|v| {
            usize::try_from(*v).ok().and_then(|k| names.get(k)).cloned().unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(bounds.iter().map(|&(v, k)| Cross::new((v, k), 6, BLACK.stroke_width(2))))?;

    for (rank, x) in xs.iter().enumerate().rev() {
        let color = Palette99::pick(rank).to_rgba();
        let row = x.iter().enumerate().map(|(k, &v)| (v, k as i32));
        chart.draw_series(LineSeries::new(row.clone(), color.stroke_width(1)))?;
        chart.draw_series(row.map(|c| Circle::new(c, 3, color.filled())))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{objective::FunctionObjective, result::OptimizerResult};
    use ndarray::array;
    use std::time::Duration;

    fn problem() -> Problem<FunctionObjective> {
        Problem::new(
            FunctionObjective::value_only(|x: &Theta| x.sum()),
            array![-5.0, -5.0, 0.0],
            array![5.0, 5.0, f64::INFINITY],
        )
        .expect("valid bounds")
        .with_fixed(vec![1], vec![0.0])
        .expect("valid fixing")
        .with_x_names(vec!["alpha", "beta", "gamma"])
        .expect("valid names")
    }

    fn record(id: &str, fval: f64, x: Theta) -> OptimizerResult {
        OptimizerResult {
            id: id.to_string(),
            x: Some(x),
            fval,
            grad: None,
            hess: None,
            x0: array![0.0, 0.0, 1.0],
            fval0: None,
            n_fval: 1,
            n_grad: 1,
            n_iter: 1,
            converged: true,
            status: "SolverConverged".to_string(),
            message: None,
            time: Duration::ZERO,
        }
    }

    #[test]
    // Purpose
    // -------
    // Only the best `n` finite starts are kept, reduced to free parameters.
    fn best_free_parameters_drops_fixed_and_limits_count() {
        let res = OptimizeResult::new(vec![
            record("0", 3.0, array![1.0, 0.0, 2.0]),
            record("1", 1.0, array![-1.0, 0.0, 0.5]),
            record("2", 2.0, array![0.0, 0.0, 1.0]),
        ]);

        let xs = best_free_parameters(&problem(), &res, Some(2)).expect("finite results");

        assert_eq!(xs, vec![array![-1.0, 0.5], array![0.0, 1.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Mismatched result vectors and empty results are reported.
    fn mismatched_and_empty_results_are_errors() {
        let res = OptimizeResult::new(vec![record("0", 1.0, array![1.0, 2.0])]);
        assert_eq!(
            best_free_parameters(&problem(), &res, None),
            Err(PlotError::DimensionMismatch { expected: 3, found: 2 })
        );
        assert_eq!(
            best_free_parameters(&problem(), &OptimizeResult::default(), None),
            Err(PlotError::NoFiniteResults)
        );
    }

    #[test]
    // Purpose
    // -------
    // The SVG carries the free parameter names and skips the fixed one.
    fn writes_svg_with_free_parameter_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("parameters.svg");
        let res = OptimizeResult::new(vec![
            record("0", 1.0, array![1.0, 0.0, 2.0]),
            record("1", 2.0, array![-3.0, 0.0, 4.0]),
        ]);

        parameters(&problem(), &res, &path, &ParametersOptions::default()).expect("plot written");

        let svg = std::fs::read_to_string(&path).expect("readable");
        assert!(svg.contains("alpha"));
        assert!(svg.contains("gamma"));
        assert!(!svg.contains("beta"));
    }
}
