//! Z-score standardization.

use crate::descriptive;

/// Error returned when a sample cannot be rescaled to unit variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StandardizeError {
    #[display("at least two values are required to standardize, got {count}")]
    TooFewValues { count: usize },
    #[display("sample has zero variance")]
    ZeroVariance,
}

/// Rescales `values` to zero mean and unit sample standard deviation.
///
/// Each value `x` becomes `(x - x̄) / s`, where `s` uses the `n - 1` denominator.
///
/// # Examples
///
/// ```
/// use skewbeta_stats::standardize::{StandardizeError, standardize};
///
/// let z = standardize(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(z, vec![-1.0, 0.0, 1.0]);
///
/// assert_eq!(standardize(&[1.0, 1.0]), Err(StandardizeError::ZeroVariance));
/// ```
pub fn standardize(values: &[f64]) -> Result<Vec<f64>, StandardizeError> {
    let count = values.len();
    let (Some(mean), Some(std_dev)) = (
        descriptive::mean(values),
        descriptive::sample_std_dev(values),
    ) else {
        return Err(StandardizeError::TooFewValues { count });
    };
    // Constant samples can leave rounding residue in the mean, so compare the
    // spread against the magnitude of the data instead of exact zero.
    if !std_dev.is_finite() || std_dev <= mean.abs().max(1.0) * f64::EPSILON * 4.0 {
        return Err(StandardizeError::ZeroVariance);
    }
    Ok(values.iter().map(|v| (v - mean) / std_dev).collect())
}
