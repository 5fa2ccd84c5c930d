//! Binned summaries of coefficients by the magnitude of skewness.
//!
//! The trials are grouped into equal-width bins of `|skewness of x_var|`, from
//! zero to the largest magnitude observed. Each bin reports descriptive
//! statistics and a 90% quantile band of both standardized coefficients, which
//! makes the shrinking of `beta_var` with growing skewness visible at a glance
//! while `beta_const` stays flat.
//!
//! # Examples
//!
//! ```
//! use skewbeta_sim::{summary::SkewnessSummary, table::SkewnessBetaPoint};
//!
//! let points = [(0.0, 0.41), (0.5, 0.39), (2.0, 0.2), (-3.0, 0.15)].map(|(skewness, beta_var)| {
//!     SkewnessBetaPoint { mixing_fraction: 0.0, skewness, beta_const: 0.41, beta_var }
//! });
//! let summary = SkewnessSummary::new(points, 3);
//! assert_eq!(summary.bins.len(), 3);
//! assert_eq!(summary.bins[0].count, 2); // |skew| in [0, 1)
//! assert_eq!(summary.bins[2].count, 2); // |skew| in [2, 3]
//! ```

use std::ops::Range;

use skewbeta_stats::{descriptive::DescriptiveStats, quantile::QuantileBand};

use crate::table::SkewnessBetaPoint;

/// Coverage of the quantile band reported for each coefficient (P05 to P95).
pub const BAND_COVERAGE: f64 = 0.9;

/// Distribution of one coefficient within a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSummary {
    pub stats: DescriptiveStats,
    /// Median and the [`BAND_COVERAGE`] central interval.
    pub band: QuantileBand,
}

impl CoefficientSummary {
    fn new(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            stats: DescriptiveStats::from_sorted(&sorted)?,
            band: QuantileBand::from_sorted(&sorted, BAND_COVERAGE)?,
        })
    }
}

/// Trials whose `|skewness|` falls in `range`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewnessBin {
    /// Range of `|skewness|` (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// Number of trials in this bin.
    pub count: usize,
    /// `beta_const` of the trials in this bin (`None` if the bin is empty).
    pub beta_const: Option<CoefficientSummary>,
    /// `beta_var` of the trials in this bin (`None` if the bin is empty).
    pub beta_var: Option<CoefficientSummary>,
}

/// Coefficient summaries over equal-width bins of `|skewness|`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewnessSummary {
    pub bins: Vec<SkewnessBin>,
}

impl SkewnessSummary {
    /// Groups `points` into `num_bins` bins of `|skewness|`.
    ///
    /// # Arguments
    ///
    /// * `points` - Coefficient/skewness points of defined trials, in any order
    /// * `num_bins` - Number of equal-width bins between 0 and the largest `|skewness|`
    ///
    /// # Returns
    ///
    /// One [`SkewnessBin`] per bin in ascending order of `|skewness|`, including
    /// empty bins. The last bin is closed so that the largest magnitude falls in it.
    /// Returns no bins if `points` is empty or `num_bins` is zero. When every
    /// point has zero skewness the bins span `[0, 1)` so that widths stay positive.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(points: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = SkewnessBetaPoint>,
    {
        let points = points.into_iter().collect::<Vec<_>>();
        if points.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let max_abs = points
            .iter()
            .map(|p| p.skewness.abs())
            .fold(0.0, f64::max);
        let upper = if max_abs > 0.0 { max_abs } else { 1.0 };
        let width = upper / num_bins as f64;

        let mut members = vec![vec![]; num_bins];
        for point in &points {
            let idx = ((point.skewness.abs() / width).floor() as usize).min(num_bins - 1);
            members[idx].push(*point);
        }

        let bins = members
            .into_iter()
            .enumerate()
            .map(|(i, members)| {
                let start = width * i as f64;
                let end = if i + 1 == num_bins {
                    upper.next_up()
                } else {
                    width * (i + 1) as f64
                };
                SkewnessBin {
                    range: start..end,
                    count: members.len(),
                    beta_const: CoefficientSummary::new(members.iter().map(|p| p.beta_const)),
                    beta_var: CoefficientSummary::new(members.iter().map(|p| p.beta_var)),
                }
            })
            .collect();
        Self { bins }
    }

    /// Total number of trials over all bins.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Bins that contain at least one trial.
    pub fn non_empty_bins(&self) -> impl Iterator<Item = &SkewnessBin> + '_ {
        self.bins.iter().filter(|b| b.count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(skewness: f64, beta_const: f64, beta_var: f64) -> SkewnessBetaPoint {
        SkewnessBetaPoint {
            mixing_fraction: 0.5,
            skewness,
            beta_const,
            beta_var,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(SkewnessSummary::new([], 5).bins.is_empty());
        assert!(SkewnessSummary::new([point(0.1, 0.4, 0.4)], 0).bins.is_empty());
    }

    #[test]
    fn test_sign_of_skewness_is_ignored() {
        let summary = SkewnessSummary::new([point(-2.0, 0.4, 0.2), point(2.0, 0.4, 0.2)], 2);
        assert_eq!(summary.bins[0].count, 0);
        assert_eq!(summary.bins[1].count, 2);
        assert!(summary.bins[0].beta_var.is_none());
    }

    #[test]
    fn test_bins_cover_all_points() {
        let points = (0..100).map(|i| {
            let s = f64::from(i) / 10.0 - 5.0;
            point(s, 0.4, 0.4 / (1.0 + s.abs()))
        });
        let summary = SkewnessSummary::new(points, 7);
        assert_eq!(summary.total_count(), 100);
        for pair in summary.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
        assert!(summary.bins.last().unwrap().range.contains(&5.0));
    }

    #[test]
    fn test_all_zero_skewness_uses_unit_range() {
        let summary = SkewnessSummary::new([point(0.0, 0.4, 0.4), point(0.0, 0.5, 0.3)], 4);
        assert_eq!(summary.bins[0].count, 2);
        assert_eq!(summary.bins[0].range, 0.0..0.25);
        let beta_const = summary.bins[0].beta_const.as_ref().unwrap();
        assert!((beta_const.stats.mean - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_bin_statistics() {
        let summary = SkewnessSummary::new(
            [
                point(0.1, 0.40, 0.41),
                point(0.2, 0.42, 0.39),
                point(3.0, 0.44, 0.10),
            ],
            2,
        );
        let low = &summary.bins[0];
        let high = &summary.bins[1];
        assert_eq!(low.count, 2);
        assert!((low.beta_var.as_ref().unwrap().stats.mean - 0.40).abs() < 1e-12);
        let high_band = high.beta_var.as_ref().unwrap().band;
        assert_eq!(high_band.median, 0.10);
        assert_eq!(high_band.width(), 0.0);
        let low_band = low.beta_var.as_ref().unwrap().band;
        assert!((low_band.median - 0.40).abs() < 1e-12);
        assert!(low_band.lower < low_band.median && low_band.median < low_band.upper);
        assert_eq!(summary.non_empty_bins().count(), 2);
    }
}
