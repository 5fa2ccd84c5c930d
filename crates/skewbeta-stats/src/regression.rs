//! Ordinary least squares regression.
//!
//! [`OrdinaryLeastSquares`] fits `y = b0 + b1·x1 + … + bk·xk` by solving the
//! normal equations `(XᵀX) b = Xᵀy` with an LU decomposition. This is adequate
//! for the small, well-conditioned designs produced by simulations (a handful of
//! predictors, thousands of observations). It is not a replacement for a
//! QR-based solver on ill-conditioned data.
//!
//! # Examples
//!
//! ```
//! use skewbeta_stats::regression::OrdinaryLeastSquares;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 3.0, 5.0, 7.0];
//! let fit = OrdinaryLeastSquares::with_intercept().fit(&y, &[&x]).unwrap();
//! assert!((fit.intercept.unwrap() - 1.0).abs() < 1e-10);
//! assert!((fit.slopes[0] - 2.0).abs() < 1e-10);
//! ```

use nalgebra::{DMatrix, DVector};

/// Errors from fitting a least squares model.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("predictor {index} has {actual} observations, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[display("{observations} observations cannot identify {parameters} parameters")]
    TooFewObservations {
        observations: usize,
        parameters: usize,
    },
    #[display("design matrix is singular (collinear or constant predictors)")]
    Singular,
    #[display("fitted coefficients are not finite")]
    NonFinite,
}

/// Least squares estimator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinaryLeastSquares {
    /// Whether a constant column is added to the design matrix.
    pub intercept: bool,
}

/// Coefficients estimated by [`OrdinaryLeastSquares::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// Intercept estimate, present when the model includes one.
    pub intercept: Option<f64>,
    /// Slope estimates, one per predictor in input order.
    pub slopes: Vec<f64>,
}

impl OrdinaryLeastSquares {
    /// Pivots of the LU factor `U` smaller than this fraction of the largest one
    /// are treated as zero.
    const SINGULARITY_TOLERANCE: f64 = 1e-10;

    #[must_use]
    pub const fn with_intercept() -> Self {
        Self { intercept: true }
    }

    #[must_use]
    pub const fn without_intercept() -> Self {
        Self { intercept: false }
    }

    /// Fits `response` on `predictors`.
    ///
    /// Every predictor slice must have the same length as `response`.
    pub fn fit(&self, response: &[f64], predictors: &[&[f64]]) -> Result<OlsFit, FitError> {
        let n = response.len();
        for (index, predictor) in predictors.iter().enumerate() {
            if predictor.len() != n {
                return Err(FitError::LengthMismatch {
                    index,
                    expected: n,
                    actual: predictor.len(),
                });
            }
        }

        let offset = usize::from(self.intercept);
        let parameters = predictors.len() + offset;
        if parameters == 0 || n < parameters {
            return Err(FitError::TooFewObservations {
                observations: n,
                parameters,
            });
        }

        // Column accessor over the implicit design matrix [1 | x1 | ... | xk].
        let column = |j: usize, i: usize| -> f64 {
            if j < offset {
                1.0
            } else {
                predictors[j - offset][i]
            }
        };

        // Normal equations XᵀX b = Xᵀy, with XᵀX row-major.
        let mut xtx = vec![0.0; parameters * parameters];
        let mut xty = vec![0.0; parameters];
        for (i, &yi) in response.iter().enumerate() {
            for r in 0..parameters {
                let xr = column(r, i);
                xty[r] += xr * yi;
                for c in r..parameters {
                    xtx[r * parameters + c] += xr * column(c, i);
                }
            }
        }
        for r in 0..parameters {
            for c in 0..r {
                xtx[r * parameters + c] = xtx[c * parameters + r];
            }
        }

        let coefficients = solve_normal_equations(parameters, &xtx, xty)?;
        if coefficients.iter().any(|b| !b.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let (intercept, slopes) = coefficients.split_at(offset);
        Ok(OlsFit {
            intercept: intercept.first().copied(),
            slopes: slopes.to_vec(),
        })
    }
}

/// Solves `XᵀX b = Xᵀy` by LU decomposition.
///
/// Fails with [`FitError::Singular`] when the decomposition is not invertible or
/// when a pivot of `U` is negligible next to the largest one, which is how exact
/// collinearity shows up after rounding.
fn solve_normal_equations(size: usize, xtx: &[f64], xty: Vec<f64>) -> Result<Vec<f64>, FitError> {
    let lu = DMatrix::from_row_slice(size, size, xtx).lu();
    let pivots = lu.u().diagonal().map(f64::abs);
    let largest = pivots.max();
    if !largest.is_finite()
        || pivots.min() <= largest * OrdinaryLeastSquares::SINGULARITY_TOLERANCE
    {
        return Err(FitError::Singular);
    }
    let solution = lu
        .solve(&DVector::from_vec(xty))
        .ok_or(FitError::Singular)?;
    Ok(solution.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_linear_relationship() {
        let x1 = [-0.1, 0.7, 3.2, 1.5, -2.0];
        let x2 = [0.2, 0.5, 0.1, -0.4, 0.9];
        let y = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 0.3 + 1.2 * a - 0.5 * b)
            .collect::<Vec<_>>();
        let fit = OrdinaryLeastSquares::with_intercept()
            .fit(&y, &[&x1, &x2])
            .unwrap();
        assert!((fit.intercept.unwrap() - 0.3).abs() < 1e-9);
        assert!((fit.slopes[0] - 1.2).abs() < 1e-9);
        assert!((fit.slopes[1] + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_without_intercept_through_origin() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.1, 5.9];
        let fit = OrdinaryLeastSquares::without_intercept()
            .fit(&y, &[&x])
            .unwrap();
        // Σxy / Σx² = (2 + 8.2 + 17.7) / 14
        assert!((fit.slopes[0] - 27.9 / 14.0).abs() < 1e-12);
        assert_eq!(fit.intercept, None);
    }

    #[test]
    fn test_least_squares_residuals_are_orthogonal() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [0.5, 0.9, 2.4, 2.8, 4.7, 4.9];
        let fit = OrdinaryLeastSquares::with_intercept().fit(&y, &[&x]).unwrap();
        let b0 = fit.intercept.unwrap();
        let b1 = fit.slopes[0];
        let residuals = x
            .iter()
            .zip(&y)
            .map(|(x, y)| y - b0 - b1 * x)
            .collect::<Vec<_>>();
        assert!(residuals.iter().sum::<f64>().abs() < 1e-9);
        assert!(
            residuals
                .iter()
                .zip(&x)
                .map(|(r, x)| r * x)
                .sum::<f64>()
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_constant_predictor_with_intercept_is_singular() {
        let x = [1.0; 5];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(
            OrdinaryLeastSquares::with_intercept().fit(&y, &[&x]),
            Err(FitError::Singular)
        );
    }

    #[test]
    fn test_collinear_predictors_are_singular() {
        let x1 = [1.0, 2.0, 3.0, 4.0];
        let x2 = [2.0, 4.0, 6.0, 8.0];
        let y = [1.0, 0.0, 1.0, 0.0];
        assert_eq!(
            OrdinaryLeastSquares::with_intercept().fit(&y, &[&x1, &x2]),
            Err(FitError::Singular)
        );
    }

    #[test]
    fn test_collinear_after_rounding_is_singular() {
        let x1 = [0.3, 0.7, 1.1, 1.9, 2.3, 0.45];
        let x2 = x1.map(|v| v * 0.1);
        let y = [0.2, 1.0, 0.4, 1.3, 0.8, 0.1];
        assert_eq!(
            OrdinaryLeastSquares::with_intercept().fit(&y, &[&x1, &x2]),
            Err(FitError::Singular)
        );
    }

    #[test]
    fn test_simple_slope_matches_covariance_ratio() {
        let x = [0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let y = [0.3, 1.4, 0.9, -0.2, 1.1, 0.4, 0.1, 0.7];
        let mean_x = x.iter().sum::<f64>() / 8.0;
        let mean_y = y.iter().sum::<f64>() / 8.0;
        let sxy = x
            .iter()
            .zip(&y)
            .map(|(a, b)| (a - mean_x) * (b - mean_y))
            .sum::<f64>();
        let sxx = x.iter().map(|a| (a - mean_x).powi(2)).sum::<f64>();

        let fit = OrdinaryLeastSquares::with_intercept().fit(&y, &[&x]).unwrap();
        assert!((fit.slopes[0] - sxy / sxx).abs() < 1e-12);
        assert!((fit.intercept.unwrap() - (mean_y - sxy / sxx * mean_x)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_predictor_without_intercept_is_singular() {
        let x = [0.0; 4];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            OrdinaryLeastSquares::without_intercept().fit(&y, &[&x]),
            Err(FitError::Singular)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let x = [1.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(
            OrdinaryLeastSquares::with_intercept().fit(&y, &[&x]),
            Err(FitError::LengthMismatch {
                index: 0,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_too_few_observations() {
        let x1 = [1.0, 2.0];
        let x2 = [0.0, 1.0];
        let y = [1.0, 2.0];
        assert_eq!(
            OrdinaryLeastSquares::with_intercept().fit(&y, &[&x1, &x2]),
            Err(FitError::TooFewObservations {
                observations: 2,
                parameters: 3
            })
        );
    }
}
