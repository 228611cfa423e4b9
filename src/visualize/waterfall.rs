//! Waterfall plot: sorted final objective values against start rank.
//!
//! A plateau at the left of the plot means several starts found the same
//! best value; steps further right are other local optima or stalled
//! starts. Failed and non-finite starts are left out.
use crate::{
    result::OptimizeResult,
    visualize::{
        errors::{PlotError, PlotResult},
        padded_range, validate_size,
    },
};
use plotters::prelude::*;
use std::path::Path;

/// Vertical axis of a waterfall plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaterfallScale {
    /// `log10(fval − min + offset)`; `offset > 0` keeps the best start finite.
    Log10 { offset: f64 },
    /// Raw `fval`.
    Linear,
}

/// Figure options for [`waterfall`].
///
/// Default: 800 × 600, title `"Waterfall plot"`, `Log10 { offset: 1.0 }`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub scale: WaterfallScale,
}

impl WaterfallOptions {
    /// # Errors
    /// [`PlotError::InvalidOptions`] for a zero-sized figure or a
    /// non-positive / non-finite log offset.
    pub fn new(
        width: u32, height: u32, title: impl Into<String>, scale: WaterfallScale,
    ) -> PlotResult<Self> {
        let opts = Self { width, height, title: title.into(), scale };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> PlotResult<()> {
        validate_size(self.width, self.height)?;
        if let WaterfallScale::Log10 { offset } = self.scale {
            if !(offset.is_finite() && offset > 0.0) {
                return Err(PlotError::InvalidOptions {
                    reason: "log10 offset must be finite and greater than zero",
                });
            }
        }
        Ok(())
    }
}

impl Default for WaterfallOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Waterfall plot".to_string(),
            scale: WaterfallScale::Log10 { offset: 1.0 },
        }
    }
}

/// Plotted points `(rank, y, converged)` for the finite starts of `result`.
///
/// # Errors
/// [`PlotError::NoFiniteResults`] when no start has a finite value.
pub fn waterfall_points(
    result: &OptimizeResult, scale: WaterfallScale,
) -> PlotResult<Vec<(f64, f64, bool)>> {
    let finite: Vec<_> = result.iter().filter(|r| r.is_finite()).collect();
    let Some(best) = finite.first() else {
        return Err(PlotError::NoFiniteResults);
    };
    let min = best.fval;
    Ok(finite
        .iter()
        .enumerate()
        .map(|(rank, r)| {
            let y = match scale {
                WaterfallScale::Log10 { offset } => (r.fval - min + offset).log10(),
                WaterfallScale::Linear => r.fval,
            };
            (rank as f64, y, r.converged)
        })
        .collect())
}

/// Write a waterfall plot of `result` to an SVG file at `path`.
///
/// Converged starts are drawn as filled circles, the others as hollow
/// ones.
///
/// # Errors
/// - [`PlotError::InvalidOptions`] from option validation.
/// - [`PlotError::NoFiniteResults`] when nothing can be plotted.
/// - [`PlotError::Backend`] for drawing or I/O failures.
pub fn waterfall<P: AsRef<Path>>(
    result: &OptimizeResult, path: P, opts: &WaterfallOptions,
) -> PlotResult<()> {
    opts.validate()?;
    let points = waterfall_points(result, opts.scale)?;
    let (y0, y1) = padded_range(points.iter().map(|p| p.1));
    let x1 = (points.len() as f64 - 0.5).max(0.5);
    let y_desc = match opts.scale {
        WaterfallScale::Log10 { offset } => format!("log10(fval - min + {offset})"),
        WaterfallScale::Linear => "fval".to_string(),
    };

    let root = SVGBackend::new(path.as_ref(), (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&opts.title, ("sans-serif", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Ordered optimizer run")
        .y_desc(y_desc)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    let line_color = RGBColor(31, 119, 180);
    chart.draw_series(LineSeries::new(points.iter().map(|&(x, y, _)| (x, y)), &line_color))?;
    chart.draw_series(points.iter().map(|&(x, y, converged)| {
        let style = if converged { line_color.filled() } else { line_color.stroke_width(1) };
        Circle::new((x, y), 4, style)
    }))?;

    root.present()?;
    Ok(())
}
