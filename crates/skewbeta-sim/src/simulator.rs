//! The Monte Carlo loop.
//!
//! [`Simulator::run`] evaluates every trial of a [`SimulationConfig`] and returns
//! the trials as a [`ResultTable`] in index order. With several threads each
//! worker owns a contiguous range of trial indices and the ranges are joined in
//! order, so the order of the table never depends on which trial finishes first.
//!
//! # Example
//!
//! ```
//! use skewbeta_sim::{config::SimulationConfig, simulator::Simulator};
//!
//! let config = SimulationConfig {
//!     trial_count: 21,
//!     sample_size: 200,
//!     ..SimulationConfig::default()
//! };
//! let table = Simulator::new(config)?.run()?;
//! assert_eq!(table.len(), 21);
//! // p = 0.0: the varying regressor is constant, so nothing can be estimated.
//! assert!(table.trials()[0].estimate.is_undefined());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{ops::Range, thread};

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use skewbeta_stats::{moments::SkewnessKind, regression::OrdinaryLeastSquares};

use crate::{
    config::{ConfigError, SeedStrategy, SimulationConfig},
    estimator::{CoefficientFitter, SkewnessStatistic},
    sampler::{SampleError, TrialSample},
    table::ResultTable,
    trial::Trial,
};

/// Errors that stop a simulation run after it has started.
///
/// Per-trial estimation failures are not errors; they are recorded as
/// undefined estimates in the table. Configuration problems are reported by
/// [`Simulator::new`] before any trial runs.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("failed to sample trial {trial_index}: {source}")]
    Sampling {
        trial_index: usize,
        source: SampleError,
    },
}

/// Runs skewness-bias trials with a fitter and a skewness statistic.
#[derive(Debug, Clone)]
pub struct Simulator<F = OrdinaryLeastSquares, S = SkewnessKind> {
    config: SimulationConfig,
    fitter: F,
    skewness: S,
}

impl Simulator {
    /// Creates a simulator using least squares and the configured skewness estimator.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let fitter = OrdinaryLeastSquares {
            intercept: config.intercept,
        };
        let skewness = config.skewness;
        Self::with_estimators(config, fitter, skewness)
    }
}

impl<F, S> Simulator<F, S>
where
    F: CoefficientFitter + Sync,
    S: SkewnessStatistic + Sync,
{
    /// Creates a simulator with custom estimation capabilities.
    ///
    /// The configuration's `intercept` and `skewness` fields are not consulted;
    /// `fitter` and `skewness` are used as given.
    pub fn with_estimators(
        config: SimulationConfig,
        fitter: F,
        skewness: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            fitter,
            skewness,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every trial and collects the results in trial order.
    ///
    /// # Returns
    ///
    /// A [`ResultTable`] with exactly `trial_count` rows, row `j` holding trial `j`.
    /// Trials whose coefficients cannot be estimated are kept as undefined rows.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Sampling`] if a trial's data cannot be drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use skewbeta_sim::{
    ///     config::{SeedStrategy, SimulationConfig},
    ///     simulator::Simulator,
    /// };
    ///
    /// let config = SimulationConfig {
    ///     trial_count: 9,
    ///     sample_size: 100,
    ///     seeding: SeedStrategy::PerTrial,
    ///     threads: 2,
    ///     ..SimulationConfig::default()
    /// };
    /// let table = Simulator::new(config)?.run()?;
    /// assert_eq!(table.get(5).unwrap().mixing_fraction, 0.5);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn run(&self) -> Result<ResultTable, SimulationError> {
        let trials = match self.config.seeding {
            SeedStrategy::SingleStream => {
                let mut rng = Pcg32::seed_from_u64(self.config.seed);
                (1..=self.config.trial_count)
                    .map(|trial_index| self.run_trial(trial_index, &mut rng))
                    .collect::<Result<Vec<_>, _>>()?
            }
            SeedStrategy::PerTrial => self.run_independent()?,
        };
        Ok(ResultTable::new(trials))
    }

    /// Generates and evaluates trial `trial_index` with draws from `rng`.
    pub fn run_trial(&self, trial_index: usize, rng: &mut Pcg32) -> Result<Trial, SimulationError> {
        let mixing_fraction = self.config.mixing_fraction(trial_index);
        let sample = TrialSample::generate(rng, &self.config, mixing_fraction)
            .map_err(|source| SimulationError::Sampling {
                trial_index,
                source,
            })?;
        Ok(Trial::evaluate(
            trial_index,
            mixing_fraction,
            &sample,
            &self.fitter,
            &self.skewness,
        ))
    }

    /// Generator of the independent stream assigned to `trial_index`.
    ///
    /// The trial index is mixed into the seed before expansion, so both the
    /// generator state and its stream increment differ between trials.
    #[must_use]
    pub fn trial_rng(&self, trial_index: usize) -> Pcg32 {
        let mix = (trial_index as u64).wrapping_mul(TRIAL_SEED_MULTIPLIER);
        Pcg32::seed_from_u64(self.config.seed ^ mix)
    }

    fn run_range(&self, indices: Range<usize>) -> Result<Vec<Trial>, SimulationError> {
        indices
            .map(|trial_index| self.run_trial(trial_index, &mut self.trial_rng(trial_index)))
            .collect()
    }

    fn run_independent(&self) -> Result<Vec<Trial>, SimulationError> {
        let trial_count = self.config.trial_count;
        if self.config.threads == 1 {
            return self.run_range(1..trial_count + 1);
        }

        let chunk_size = trial_count.div_ceil(self.config.threads);
        thread::scope(|s| -> Result<Vec<Trial>, SimulationError> {
            let workers = (1..=trial_count)
                .step_by(chunk_size)
                .map(|first| {
                    let last = (first + chunk_size).min(trial_count + 1);
                    s.spawn(move || self.run_range(first..last))
                })
                .collect::<Vec<_>>();
            let mut trials = Vec::with_capacity(trial_count);
            // Chunks are joined in index order, so rows stay in trial order.
            for worker in workers {
                trials.extend(worker.join().expect("trial worker panicked")?);
            }
            Ok(trials)
        })
    }
}

/// Odd 64-bit constant (2^64 / golden ratio) spreading trial indices over seeds.
const TRIAL_SEED_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;
