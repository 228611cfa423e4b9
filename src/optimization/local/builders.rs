//! local::builders: L-BFGS solver construction.
//!
//! Hide Argmin's generic wiring behind two builders, one per supported line
//! search, plus a shared helper that applies the tolerances from
//! [`LocalOptions`]. Initial parameters and `max_iters` are runtime
//! concerns of the runner and are not touched here.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    local::{
        traits::LocalOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HAGER_ZHANG_STEP_BOUNDS, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) as history size,
/// restricts step lengths to [`HAGER_ZHANG_STEP_BOUNDS`] and applies
/// `tol_grad` / `tol_cost` via [`configure_lbfgs`].
///
/// # Errors
/// Any tolerance or step bound rejected by Argmin, converted into `OptError`.
pub fn build_optimizer_hager_zhang(opts: &LocalOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let (step_min, step_max) = HAGER_ZHANG_STEP_BOUNDS;
    let linesearch = HagerZhangLS::new().with_bounds(step_min, step_max)?;
    configure_lbfgs(LbfgsHagerZhang::new(linesearch, mem), opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Same wiring as [`build_optimizer_hager_zhang`].
pub fn build_optimizer_more_thuente(opts: &LocalOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply the optional gradient and cost-change tolerances to an L-BFGS
/// solver, whatever its line search. A `None` tolerance keeps Argmin's
/// default.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &LocalOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::local::traits::{LineSearcher, Tolerances};

    fn options(line_searcher: LineSearcher, lbfgs_mem: Option<usize>) -> LocalOptions {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        LocalOptions::new(tols, line_searcher, false, lbfgs_mem)
            .expect("LocalOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with the default and an explicit history size.
    fn builders_accept_default_and_explicit_memory() {
        assert!(build_optimizer_hager_zhang(&options(LineSearcher::HagerZhang, None)).is_ok());
        assert!(build_optimizer_hager_zhang(&options(LineSearcher::HagerZhang, Some(11))).is_ok());
        assert!(build_optimizer_more_thuente(&options(LineSearcher::MoreThuente, None)).is_ok());
        assert!(build_optimizer_more_thuente(&options(LineSearcher::MoreThuente, Some(3))).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves Argmin defaults in place when both
    // tolerances are absent.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = LocalOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("LocalOptions should be valid");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
