//! Central moments and skewness estimators.
//!
//! Skewness is the third standardized moment of a distribution. For a sample it is
//! estimated from the central moments
//!
//! ```text
//! m2 = Σ (x - x̄)² / n
//! m3 = Σ (x - x̄)³ / n
//! g1 = m3 / m2^{3/2}
//! ```
//!
//! `g1` is what most statistical packages report as plain "skewness". The
//! adjusted Fisher–Pearson coefficient `G1 = g1 · √(n(n−1)) / (n−2)` corrects the
//! small-sample bias and is available as [`SkewnessKind::Adjusted`].
//!
//! A binary variable with success probability `p` has skewness
//! `(1 − 2p) / √(p(1 − p))`: zero at `p = 0.5`, positive when ones are rare and
//! negative when zeros are rare.
//!
//! # Examples
//!
//! ```
//! use skewbeta_stats::moments::{CentralMoments, SkewnessKind};
//!
//! // 1 one among 4 values: p = 0.25
//! let values = [0.0, 0.0, 0.0, 1.0];
//! let skew = SkewnessKind::Moment.compute(&values).unwrap();
//! assert!((skew - 0.5 / 0.1875f64.sqrt()).abs() < 1e-12);
//!
//! let moments = CentralMoments::new(&values).unwrap();
//! assert_eq!(moments.mean, 0.25);
//! ```

use serde::{Deserialize, Serialize};

/// Mean and second/third central moments of a sample (population denominators).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralMoments {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Second central moment, `Σ (x - x̄)² / n`.
    pub m2: f64,
    /// Third central moment, `Σ (x - x̄)³ / n`.
    pub m3: f64,
}

impl CentralMoments {
    /// Computes the central moments of `values`, or `None` if empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let count = values.len();
        let mean = crate::descriptive::mean(values)?;
        let n = count as f64;
        let (s2, s3) = values.iter().fold((0.0, 0.0), |(s2, s3), &v| {
            let d = v - mean;
            let d2 = d * d;
            (s2 + d2, s3 + d2 * d)
        });
        Some(Self {
            count,
            mean,
            m2: s2 / n,
            m3: s3 / n,
        })
    }

    /// Third standardized moment `m3 / m2^{3/2}`.
    ///
    /// Returns `None` when the sample has no spread.
    #[must_use]
    pub fn skewness(&self) -> Option<f64> {
        if self.m2 <= 0.0 || !self.m2.is_finite() {
            return None;
        }
        let g1 = self.m3 / self.m2.powf(1.5);
        g1.is_finite().then_some(g1)
    }

    /// Adjusted Fisher–Pearson skewness `g1 · √(n(n−1)) / (n−2)`.
    ///
    /// Returns `None` when the sample has no spread or fewer than three values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn adjusted_skewness(&self) -> Option<f64> {
        if self.count < 3 {
            return None;
        }
        let n = self.count as f64;
        let g1 = self.skewness()?;
        Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
    }
}

/// Choice of sample skewness estimator.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewnessKind {
    /// Third standardized moment `g1` with population moments.
    #[default]
    Moment,
    /// Adjusted Fisher–Pearson coefficient `G1`.
    Adjusted,
}

impl SkewnessKind {
    /// Computes the chosen skewness estimator for `values`.
    ///
    /// Returns `None` for empty or constant samples (and for fewer than three
    /// values with [`SkewnessKind::Adjusted`]).
    #[must_use]
    pub fn compute(self, values: &[f64]) -> Option<f64> {
        let moments = CentralMoments::new(values)?;
        match self {
            Self::Moment => moments.skewness(),
            Self::Adjusted => moments.adjusted_skewness(),
        }
    }
}
