//! Interpolated sample quantiles.
//!
//! Quantiles use linear interpolation between order statistics (Hyndman and
//! Fan type 7, the default of R's `quantile` and of NumPy). For a sorted sample
//! `x[0..n]` and probability `q`, the position is `h = (n - 1)·q` and the
//! quantile is `x[⌊h⌋] + (h - ⌊h⌋)·(x[⌊h⌋ + 1] - x[⌊h⌋])`.

/// Returns the type-7 quantile of `sorted_values` at probability `q`.
///
/// Returns `None` when the sample is empty or `q` is outside `[0, 1]`.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use skewbeta_stats::quantile::quantile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&values, 0.5), Some(2.5));
/// assert_eq!(quantile(&values, 1.0), Some(4.0));
/// assert_eq!(quantile(&[], 0.5), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile(sorted_values: &[f64], q: f64) -> Option<f64> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if sorted_values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (sorted_values.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let Some(&next) = sorted_values.get(lower + 1) else {
        return Some(sorted_values[lower]);
    };
    let base = sorted_values[lower];
    Some(base + (h - h.floor()) * (next - base))
}

/// Median and a central interval of a sample.
///
/// A band with coverage `0.9` spans the 5th to the 95th percentile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileBand {
    /// Lower bound, the `(1 - coverage) / 2` quantile.
    pub lower: f64,
    /// The 0.5 quantile.
    pub median: f64,
    /// Upper bound, the `(1 + coverage) / 2` quantile.
    pub upper: f64,
}

impl QuantileBand {
    /// Computes the band from sorted values.
    ///
    /// Returns `None` when the sample is empty or `coverage` is outside `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skewbeta_stats::quantile::QuantileBand;
    ///
    /// let values = (0..=100).map(f64::from).collect::<Vec<_>>();
    /// let band = QuantileBand::from_sorted(&values, 0.9).unwrap();
    /// assert!((band.lower - 5.0).abs() < 1e-9);
    /// assert_eq!(band.median, 50.0);
    /// assert!((band.upper - 95.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], coverage: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&coverage) {
            return None;
        }
        let tail = (1.0 - coverage) / 2.0;
        Some(Self {
            lower: quantile(sorted_values, tail)?,
            median: quantile(sorted_values, 0.5)?,
            upper: quantile(sorted_values, 1.0 - tail)?,
        })
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
