//! Simulation parameters and their validation.

use serde::{Deserialize, Serialize};
use skewbeta_stats::moments::SkewnessKind;

/// How random draws are seeded across trials.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// One generator seeded once and consumed in trial order.
    ///
    /// Later trials depend on how many values earlier trials drew, so this
    /// strategy always runs sequentially.
    #[default]
    SingleStream,
    /// Each trial draws from its own generator stream selected by the trial index.
    ///
    /// Trials are independent of each other and may run on several threads.
    PerTrial,
}

/// Parameters of a skewness-bias simulation run.
///
/// Missing fields fall back to [`SimulationConfig::default`] when deserializing,
/// so a configuration file only needs the values it changes.
///
/// # Examples
///
/// ```
/// use skewbeta_sim::config::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{ "trial_count": 11 }"#).unwrap();
/// assert_eq!(config.trial_count, 11);
/// assert_eq!(config.sample_size, 1000);
/// assert_eq!(config.mixing_fraction(6), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of trials `N`.
    pub trial_count: usize,
    /// Observations generated per trial `M`.
    pub sample_size: usize,
    /// Seed of the random generator(s).
    pub seed: u64,
    /// How the seed is turned into per-trial random streams.
    pub seeding: SeedStrategy,
    /// True effect of the constant-skew regressor on the outcome.
    pub effect_const: f64,
    /// True effect of the varying-skew regressor on the outcome.
    pub effect_var: f64,
    /// Standard deviation of the normal error term.
    pub noise_scale: f64,
    /// Whether the standardized model includes an intercept.
    pub intercept: bool,
    /// Skewness estimator recorded for the varying regressor.
    pub skewness: SkewnessKind,
    /// Worker threads (only with [`SeedStrategy::PerTrial`]).
    pub threads: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: 1001,
            sample_size: 1000,
            seed: 42,
            seeding: SeedStrategy::SingleStream,
            effect_const: 1.0,
            effect_var: 1.0,
            noise_scale: 1.0,
            intercept: true,
            skewness: SkewnessKind::Moment,
            threads: 1,
        }
    }
}

/// Invalid simulation parameters, detected before any trial runs.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("trial count must be positive")]
    ZeroTrials,
    #[display("sample size must be at least {minimum}, got {sample_size}")]
    SampleTooSmall { sample_size: usize, minimum: usize },
    #[display("noise scale must be finite and positive, got {noise_scale}")]
    InvalidNoiseScale { noise_scale: f64 },
    #[display("effect sizes must be finite, got {effect_const} and {effect_var}")]
    NonFiniteEffect { effect_const: f64, effect_var: f64 },
    #[display("thread count must be positive")]
    ZeroThreads,
    #[display("{threads} threads requested, but single-stream seeding runs sequentially")]
    ParallelSingleStream { threads: usize },
}

impl SimulationConfig {
    /// Smallest sample that can identify an intercept and two slopes.
    pub const MIN_SAMPLE_SIZE: usize = 3;

    /// Checks every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.sample_size < Self::MIN_SAMPLE_SIZE {
            return Err(ConfigError::SampleTooSmall {
                sample_size: self.sample_size,
                minimum: Self::MIN_SAMPLE_SIZE,
            });
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(ConfigError::InvalidNoiseScale {
                noise_scale: self.noise_scale,
            });
        }
        if !self.effect_const.is_finite() || !self.effect_var.is_finite() {
            return Err(ConfigError::NonFiniteEffect {
                effect_const: self.effect_const,
                effect_var: self.effect_var,
            });
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.threads > 1 && self.seeding == SeedStrategy::SingleStream {
            return Err(ConfigError::ParallelSingleStream {
                threads: self.threads,
            });
        }
        Ok(())
    }

    /// Success probability of the varying regressor in trial `trial_index` (1-based).
    ///
    /// Fractions step uniformly from 0.0 at the first trial to 1.0 at the last, so
    /// with 1001 trials the step is 1/1000 and trial 501 has fraction 0.5. A single
    /// trial uses 0.0.
    ///
    /// # Panics
    ///
    /// Panics if `trial_index` is outside `1..=trial_count`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mixing_fraction(&self, trial_index: usize) -> f64 {
        assert!(
            (1..=self.trial_count).contains(&trial_index),
            "trial index {trial_index} out of range 1..={}",
            self.trial_count
        );
        if self.trial_count == 1 {
            return 0.0;
        }
        (trial_index - 1) as f64 / (self.trial_count - 1) as f64
    }
}
