//! Monte Carlo simulation of skewness bias in standardized coefficients.
//!
//! Standardized regression coefficients of binary regressors depend on how
//! unevenly the two categories are split. This crate measures that effect by
//! simulation: each trial fits the same linear model on freshly generated data,
//! with one regressor whose split is fixed at 50/50 and one whose success
//! probability (the *mixing fraction*) steps from 0 to 1 across trials.
//!
//! # How a Run Works
//!
//! 1. **Fraction** - Trial `j` of `N` uses mixing fraction `(j - 1) / (N - 1)`
//! 2. **Sample** - Draw normal errors, the balanced regressor `x_const`, and the
//!    Bernoulli regressor `x_var`, then build `y`
//! 3. **Skewness** - Record the sample skewness of the raw `x_var`
//! 4. **Standardize** - Convert `y`, `x_const` and `x_var` to z-scores
//! 5. **Fit** - Regress standardized `y` on both standardized regressors
//! 6. **Record** - Store the two standardized slopes, or why they are undefined
//!
//! # Architecture
//!
//! ```text
//! SimulationConfig
//!     ↓ drives
//! Simulator ── SeedStrategy ──→ Pcg32 stream(s)
//!     ↓ per trial
//! TrialSample (sampler)
//!     ↓ evaluated with
//! CoefficientFitter + SkewnessStatistic (estimator)
//!     ↓ produces
//! Trial → ResultTable → SkewnessSummary
//! ```
//!
//! # Undefined Trials
//!
//! At mixing fractions 0 and 1 (and whenever a draw happens to be all zeros or
//! all ones) `x_var` is constant. Its skewness and z-scores do not exist, so the
//! trial is recorded with an [`trial::UndefinedReason`] instead of NaN
//! coefficients. Such trials never abort the run.
//!
//! # Example
//!
//! ```
//! use skewbeta_sim::{config::SimulationConfig, simulator::Simulator};
//!
//! let config = SimulationConfig {
//!     trial_count: 11,
//!     sample_size: 500,
//!     ..SimulationConfig::default()
//! };
//! let table = Simulator::new(config)?.run()?;
//! let middle = table.nearest_fraction(0.5).unwrap();
//! assert_eq!(middle.index, 6);
//! assert!(middle.estimate.coefficients().is_some());
//!
//! let summary = table.summary(4);
//! assert_eq!(summary.total_count(), table.len() - table.undefined_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod estimator;
pub mod sampler;
pub mod simulator;
pub mod summary;
pub mod table;
pub mod trial;

#[cfg(test)]
mod tests {
    use crate::{config::SimulationConfig, simulator::Simulator, table::ResultTable};

    fn full_run() -> ResultTable {
        let config = SimulationConfig {
            seed: 20_240_611,
            ..SimulationConfig::default()
        };
        Simulator::new(config).unwrap().run().unwrap()
    }

    /// Mean of `f(beta_const, beta_var)` over defined trials with `|p - center| <= radius`.
    fn window_mean<F>(table: &ResultTable, center: f64, radius: f64, f: F) -> f64
    where
        F: Fn(f64, f64) -> f64,
    {
        let values = table
            .trials()
            .iter()
            .filter(|t| (t.mixing_fraction - center).abs() <= radius)
            .filter_map(|t| t.estimate.coefficients())
            .map(|pair| f(pair.beta_const, pair.beta_var))
            .collect::<Vec<_>>();
        assert!(!values.is_empty());
        #[expect(clippy::cast_precision_loss)]
        let len = values.len() as f64;
        values.iter().sum::<f64>() / len
    }

    #[test]
    fn test_full_run_shows_skewness_bias() {
        let table = full_run();
        assert_eq!(table.len(), 1001);

        // Boundary fractions give constant x_var.
        assert!(table.get(1).unwrap().estimate.is_undefined());
        assert!(table.get(1001).unwrap().estimate.is_undefined());
        assert_eq!(table.get(1).unwrap().skewness_of_x_var, None);

        // Balanced split: both regressors have the same standardized effect,
        // 0.5 / sqrt(1.5) for unit effects and unit noise.
        let expected = 0.5 / 1.5_f64.sqrt();
        let middle = table.get(501).unwrap();
        assert_eq!(middle.mixing_fraction, 0.5);
        let pair = middle.estimate.coefficients().unwrap();
        assert!((pair.beta_const - expected).abs() < 0.15);
        assert!((pair.beta_var - expected).abs() < 0.15);
        assert!(
            (pair.beta_const - pair.beta_var).abs() < 0.05,
            "beta_const = {}, beta_var = {}",
            pair.beta_const,
            pair.beta_var
        );
        assert!(middle.skewness_of_x_var.unwrap().abs() < 0.3);

        let const_mid = window_mean(&table, 0.5, 0.05, |c, _| c);
        let var_mid = window_mean(&table, 0.5, 0.05, |_, v| v);
        assert!((const_mid - expected).abs() < 0.02, "beta_const = {const_mid}");
        assert!((var_mid - expected).abs() < 0.02, "beta_var = {var_mid}");
        let gap_mid = window_mean(&table, 0.5, 0.05, |c, v| c - v);
        assert!(gap_mid.abs() < 0.02, "beta_const - beta_var = {gap_mid}");

        // Heavily skewed x_var: its standardized coefficient shrinks while the
        // balanced regressor's stays close to its balanced value.
        let const_skewed = window_mean(&table, 0.99, 0.005, |c, _| c);
        let var_skewed = window_mean(&table, 0.99, 0.005, |_, v| v);
        assert!(var_skewed < const_skewed / 2.0, "beta_var = {var_skewed}");
        assert!((const_skewed - const_mid).abs() < 0.1);
    }

    #[test]
    fn test_full_run_skewness_sign_follows_fraction() {
        let table = full_run();
        for trial in table.trials() {
            let Some(skew) = trial.skewness_of_x_var else {
                continue;
            };
            if trial.mixing_fraction <= 0.3 {
                assert!(skew > 0.0, "trial {}: {skew}", trial.index);
            }
            if trial.mixing_fraction >= 0.7 {
                assert!(skew < 0.0, "trial {}: {skew}", trial.index);
            }
        }
    }

    #[test]
    fn test_full_run_skewness_grows_away_from_balance() {
        let table = full_run();
        // Mean |skewness| over trials whose |p - 0.5| falls in `distance`.
        let mean_abs_skew = |distance: std::ops::Range<f64>| {
            let values = table
                .skewness_by_fraction()
                .filter(|(p, _)| distance.contains(&(p - 0.5).abs()))
                .filter_map(|(_, skew)| skew.map(f64::abs))
                .collect::<Vec<_>>();
            assert!(!values.is_empty());
            #[expect(clippy::cast_precision_loss)]
            let len = values.len() as f64;
            values.iter().sum::<f64>() / len
        };
        let means = [0.0..0.1, 0.15..0.25, 0.3..0.35, 0.4..0.45]
            .map(mean_abs_skew);
        assert!(means.is_sorted_by(|a, b| a < b), "{means:?}");
        assert!(means[0] < 0.3, "{means:?}");
        assert!(means[3] > 2.0, "{means:?}");
    }

    #[test]
    fn test_full_run_beta_const_is_flat_across_skewness() {
        let table = full_run();
        let summary = table.summary(10);
        let means = summary
            .non_empty_bins()
            .filter(|bin| bin.count >= 5)
            .map(|bin| bin.beta_const.as_ref().unwrap().stats.mean)
            .collect::<Vec<_>>();
        assert!(means.len() >= 3, "{means:?}");
        let lowest = means.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(highest - lowest < 0.1, "{means:?}");
    }

    #[test]
    fn test_full_run_summary_shrinks_with_skewness() {
        let table = full_run();
        let summary = table.summary(10);
        assert_eq!(
            summary.total_count(),
            table.len() - table.undefined_count()
        );
        let mean_abs_var = |bin: &crate::summary::SkewnessBin| {
            bin.beta_var.as_ref().unwrap().stats.mean.abs()
        };
        let mut bins = summary.non_empty_bins();
        let low = bins.next().unwrap();
        let high = bins.last().unwrap();
        assert!(mean_abs_var(low) > mean_abs_var(high));
    }
}
