//! Sorted collection of start records.
use crate::{optimization::local::Theta, result::optimizer_result::OptimizerResult};

/// Relative distance to the best value under which a start counts as
/// having reached the same optimum in [`OptimizeResult::summary`].
const SAME_OPTIMUM_TOL: f64 = 1e-3;

/// All starts of a multi-start run, ordered by ascending `fval`.
///
/// The ordering is re-established by every mutating method, so `best()`
/// is always the first record. Failed starts (`fval = +∞`) sort last;
/// ties keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizeResult {
    results: Vec<OptimizerResult>,
}

impl OptimizeResult {
    pub fn new(results: Vec<OptimizerResult>) -> Self {
        let mut out = Self { results };
        out.sort();
        out
    }

    /// Order records by ascending final value.
    pub fn sort(&mut self) {
        self.results.sort_by(|a, b| a.fval.total_cmp(&b.fval));
    }

    pub fn best(&self) -> Option<&OptimizerResult> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptimizerResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[OptimizerResult] {
        &self.results
    }

    /// Final values in sorted order.
    pub fn fvals(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.fval).collect()
    }

    /// Final points in sorted order; `None` for failed starts.
    pub fn xs(&self) -> Vec<Option<&Theta>> {
        self.results.iter().map(|r| r.x.as_ref()).collect()
    }

    pub fn n_converged(&self) -> usize {
        self.results.iter().filter(|r| r.converged).count()
    }

    pub fn n_failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Merge another run into this one.
    ///
    /// Every id of `other` is prefixed with `prefix`, so results of several
    /// runs stay distinguishable; the merged collection is re-sorted.
    pub fn append(&mut self, other: OptimizeResult, prefix: &str) {
        self.results.extend(other.results.into_iter().map(|mut r| {
            r.id = format!("{prefix}{}", r.id);
            r
        }));
        self.sort();
    }

    /// Multi-line text report of the best start and the spread of values.
    ///
    /// Same text as the [`Display`](std::fmt::Display) implementation.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl<'a> IntoIterator for &'a OptimizeResult {
    type Item = &'a OptimizerResult;
    type IntoIter = std::slice::Iter<'a, OptimizerResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl std::fmt::Display for OptimizeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Optimization result: {} starts, {} converged, {} failed",
            self.len(),
            self.n_converged(),
            self.n_failed()
        )?;
        let Some(best) = self.best() else {
            return writeln!(f, "No starts recorded.");
        };
        if !best.is_finite() {
            writeln!(f, "No start reached a finite objective value.")?;
            if let Some(msg) = &best.message {
                writeln!(f, "First error: {msg}")?;
            }
            return Ok(());
        }

        let finite: Vec<f64> = self.fvals().into_iter().filter(|v| v.is_finite()).collect();
        let worst = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tol = SAME_OPTIMUM_TOL * best.fval.abs().max(1.0);
        let n_same = finite.iter().filter(|&&v| v - best.fval <= tol).count();

        writeln!(f, "Best start: id {}, fval {:.6e}, status {}", best.id, best.fval, best.status)?;
        if let Some(x) = &best.x {
            let coords: Vec<String> = x.iter().map(|v| format!("{v:.6}")).collect();
            writeln!(f, "Best x: [{}]", coords.join(", "))?;
        }
        writeln!(
            f,
            "Iterations {}, objective evaluations {}, gradient evaluations {}",
            best.n_iter, best.n_fval, best.n_grad
        )?;
        writeln!(f, "Finite values range over [{:.6e}, {:.6e}]", best.fval, worst)?;
        writeln!(f, "Starts within {SAME_OPTIMUM_TOL:e} of best: {n_same}")?;
        let total: std::time::Duration = self.results.iter().map(|r| r.time).sum();
        writeln!(f, "Total time: {total:.3?}")
    }
}
