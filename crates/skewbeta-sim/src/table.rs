//! The ordered table of trial results and its derived views.

use serde::{Deserialize, Serialize};

use crate::{summary::SkewnessSummary, trial::Trial};

/// All trials of a run, ordered by trial index.
///
/// Indices are contiguous and start at 1, so `get(j)` is the `j`-th row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    trials: Vec<Trial>,
}

/// Flat, serializable form of a [`Trial`].
///
/// Missing values (`None`) mark undefined skewness or coefficients; they are
/// `null` in JSON and empty fields in CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub trial_index: usize,
    pub mixing_fraction: f64,
    pub skewness_of_x_var: Option<f64>,
    pub beta_const: Option<f64>,
    pub beta_var: Option<f64>,
    pub undefined_reason: Option<String>,
}

impl From<&Trial> for TableRow {
    fn from(trial: &Trial) -> Self {
        let coefficients = trial.estimate.coefficients();
        Self {
            trial_index: trial.index,
            mixing_fraction: trial.mixing_fraction,
            skewness_of_x_var: trial.skewness_of_x_var,
            beta_const: coefficients.map(|c| c.beta_const),
            beta_var: coefficients.map(|c| c.beta_var),
            undefined_reason: trial.estimate.undefined_reason().map(ToString::to_string),
        }
    }
}

impl TableRow {
    /// The coefficient-versus-skewness point of this row, if all three values exist.
    #[must_use]
    pub fn point(&self) -> Option<SkewnessBetaPoint> {
        Some(SkewnessBetaPoint {
            mixing_fraction: self.mixing_fraction,
            skewness: self.skewness_of_x_var?,
            beta_const: self.beta_const?,
            beta_var: self.beta_var?,
        })
    }
}

/// Coefficients of one trial plotted against the skewness of `x_var`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewnessBetaPoint {
    pub mixing_fraction: f64,
    pub skewness: f64,
    pub beta_const: f64,
    pub beta_var: f64,
}

impl ResultTable {
    /// Wraps trials that are already in index order.
    ///
    /// # Panics
    ///
    /// Panics if the trial indices are not exactly `1..=trials.len()` in order.
    #[must_use]
    pub fn new(trials: Vec<Trial>) -> Self {
        assert!(
            trials.iter().enumerate().all(|(i, t)| t.index == i + 1),
            "trial indices must be contiguous and start at 1"
        );
        Self { trials }
    }

    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Returns the trial with 1-based index `trial_index`.
    #[must_use]
    pub fn get(&self, trial_index: usize) -> Option<&Trial> {
        self.trials.get(trial_index.checked_sub(1)?)
    }

    /// Returns the trial whose mixing fraction is closest to `fraction`.
    #[must_use]
    pub fn nearest_fraction(&self, fraction: f64) -> Option<&Trial> {
        self.trials.iter().min_by(|a, b| {
            (a.mixing_fraction - fraction)
                .abs()
                .total_cmp(&(b.mixing_fraction - fraction).abs())
        })
    }

    /// Number of trials without coefficient estimates.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| t.estimate.is_undefined())
            .count()
    }

    /// Serializable rows in trial order.
    ///
    /// # Returns
    ///
    /// One [`TableRow`] per trial. Undefined skewness and coefficients are `None`,
    /// and `undefined_reason` carries the message of the [`UndefinedReason`].
    ///
    /// [`UndefinedReason`]: crate::trial::UndefinedReason
    ///
    /// # Examples
    ///
    /// ```
    /// use skewbeta_sim::{config::SimulationConfig, simulator::Simulator};
    ///
    /// let config = SimulationConfig { trial_count: 3, sample_size: 60, ..SimulationConfig::default() };
    /// let table = Simulator::new(config)?.run()?;
    /// let rows = table.rows().collect::<Vec<_>>();
    /// assert_eq!(rows[0].beta_var, None);
    /// assert!(rows[0].undefined_reason.is_some());
    /// assert!(rows[1].beta_var.is_some());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        self.trials.iter().map(TableRow::from)
    }

    /// Skewness of `x_var` as a function of the mixing fraction.
    pub fn skewness_by_fraction(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.trials
            .iter()
            .map(|t| (t.mixing_fraction, t.skewness_of_x_var))
    }

    /// Coefficients against skewness of `x_var`, sorted by skewness.
    ///
    /// Trials with an undefined estimate or skewness are left out.
    #[must_use]
    pub fn betas_by_skewness(&self) -> Vec<SkewnessBetaPoint> {
        let mut points = self
            .trials
            .iter()
            .filter_map(|t| {
                let pair = t.estimate.coefficients()?;
                Some(SkewnessBetaPoint {
                    mixing_fraction: t.mixing_fraction,
                    skewness: t.skewness_of_x_var?,
                    beta_const: pair.beta_const,
                    beta_var: pair.beta_var,
                })
            })
            .collect::<Vec<_>>();
        points.sort_by(|a, b| a.skewness.total_cmp(&b.skewness));
        points
    }

    /// Coefficient summaries over `num_bins` equal-width bins of |skewness|.
    #[must_use]
    pub fn summary(&self, num_bins: usize) -> SkewnessSummary {
        SkewnessSummary::new(self.betas_by_skewness(), num_bins)
    }
}
