//! Synthetic data generation for a single trial.
//!
//! A trial sample consists of:
//!
//! - `error`: standard-normal noise
//! - `x_const`: a binary regressor with an exact 50/50 split, randomly permuted,
//!   so its skewness is the same in every trial
//! - `x_var`: independent Bernoulli draws with the trial's mixing fraction, so its
//!   skewness moves with the fraction
//! - `y = effect_const · x_const + effect_var · x_var + noise_scale · error`
//!
//! Draws happen in that order (error, `x_const`, `x_var`), which fixes the
//! consumption of a shared random stream.

use rand::{
    Rng,
    distr::{Bernoulli, BernoulliError, Distribution as _},
    seq::SliceRandom as _,
};
use rand_distr::StandardNormal;

use crate::config::SimulationConfig;

/// Failure to draw a trial sample.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SampleError {
    #[display("mixing fraction {probability} is not a probability")]
    InvalidProbability {
        probability: f64,
        source: BernoulliError,
    },
}

/// Raw (unstandardized) data generated for one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSample {
    /// Standard-normal error terms.
    pub error: Vec<f64>,
    /// Binary regressor with a fixed balanced split.
    pub x_const: Vec<f64>,
    /// Binary regressor drawn with the trial's mixing fraction.
    pub x_var: Vec<f64>,
    /// Outcome built from the regressors and the error.
    pub y: Vec<f64>,
}

impl TrialSample {
    /// Draws a sample of `config.sample_size` observations.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng as _;
    /// use rand_pcg::Pcg32;
    /// use skewbeta_sim::{config::SimulationConfig, sampler::TrialSample};
    ///
    /// let config = SimulationConfig { sample_size: 10, ..SimulationConfig::default() };
    /// let mut rng = Pcg32::seed_from_u64(7);
    /// let sample = TrialSample::generate(&mut rng, &config, 0.3).unwrap();
    /// assert_eq!(sample.y.len(), 10);
    /// assert_eq!(sample.x_const.iter().sum::<f64>(), 5.0);
    /// ```
    pub fn generate<R>(
        rng: &mut R,
        config: &SimulationConfig,
        mixing_fraction: f64,
    ) -> Result<Self, SampleError>
    where
        R: Rng + ?Sized,
    {
        let size = config.sample_size;
        let error = standard_normal(rng, size);
        let x_const = balanced_binary(rng, size);
        let x_var = bernoulli(rng, size, mixing_fraction)?;
        let y = error
            .iter()
            .zip(&x_const)
            .zip(&x_var)
            .map(|((e, xc), xv)| {
                config.effect_const * xc + config.effect_var * xv + config.noise_scale * e
            })
            .collect();
        Ok(Self {
            error,
            x_const,
            x_var,
            y,
        })
    }
}

/// Draws `size` independent standard-normal values.
pub fn standard_normal<R>(rng: &mut R, size: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    (0..size).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

/// Returns `size / 2` zeros and the remaining ones, randomly permuted.
///
/// For odd sizes the extra value is a one.
pub fn balanced_binary<R>(rng: &mut R, size: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let zeros = size / 2;
    let mut values = (0..size)
        .map(|i| if i < zeros { 0.0 } else { 1.0 })
        .collect::<Vec<_>>();
    values.shuffle(rng);
    values
}

/// Draws `size` independent Bernoulli(`probability`) values as 0.0/1.0.
pub fn bernoulli<R>(rng: &mut R, size: usize, probability: f64) -> Result<Vec<f64>, SampleError>
where
    R: Rng + ?Sized,
{
    let distr = Bernoulli::new(probability)
        .map_err(|source| SampleError::InvalidProbability {
            probability,
            source,
        })?;
    Ok((0..size)
        .map(|_| if distr.sample(rng) { 1.0 } else { 0.0 })
        .collect())
}
