//! Configuration of multi-start runs.
use crate::optimization::{
    errors::{OptError, OptResult},
    local::LocalOptions,
};

/// Where the local runs execute.
///
/// - `SingleCore`: starts run one after another on the calling thread.
/// - `MultiThread`: starts run on a dedicated rayon pool; `n_threads: None`
///   lets rayon pick the pool size.
///
/// Start points are drawn before dispatch, so for a fixed seed both
/// engines produce the same records (up to wall times).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    SingleCore,
    MultiThread { n_threads: Option<usize> },
}

/// Options for [`minimize`](crate::optimization::multistart::minimize).
///
/// Default:
/// - `local`: [`LocalOptions::default`]
/// - `engine`: [`Engine::SingleCore`]
/// - `seed`: `None` (entropy-seeded)
/// - `allow_failed_starts`: `true`
/// - `startpoint_resample`: `true`
/// - `max_resample`: `100`
/// - `compute_hessian`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct MultistartOptions {
    pub local: LocalOptions,
    pub engine: Engine,
    pub seed: Option<u64>,
    pub allow_failed_starts: bool,
    pub startpoint_resample: bool,
    pub max_resample: usize,
    pub compute_hessian: bool,
}

impl MultistartOptions {
    /// Validated constructor; remaining fields take their defaults and can
    /// be changed with struct update syntax.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxResample`] for `max_resample == 0`.
    /// - [`OptError::InvalidThreadCount`] for `MultiThread { n_threads: Some(0) }`.
    pub fn new(
        local: LocalOptions, engine: Engine, seed: Option<u64>, max_resample: usize,
    ) -> OptResult<Self> {
        let opts = Self { local, engine, seed, max_resample, ..Self::default() };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check fields that may have been set directly.
    pub fn validate(&self) -> OptResult<()> {
        if self.max_resample == 0 {
            return Err(OptError::InvalidMaxResample { max_resample: 0 });
        }
        if let Engine::MultiThread { n_threads: Some(0) } = self.engine {
            return Err(OptError::InvalidThreadCount { n_threads: 0 });
        }
        Ok(())
    }
}

impl Default for MultistartOptions {
    fn default() -> Self {
        Self {
            local: LocalOptions::default(),
            engine: Engine::SingleCore,
            seed: None,
            allow_failed_starts: true,
            startpoint_resample: true,
            max_resample: 100,
            compute_hessian: false,
        }
    }
}
