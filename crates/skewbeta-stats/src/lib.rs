//! Statistical primitives for the skewness-bias simulation.
//!
//! This crate provides the small set of numerical tools the simulator consumes:
//!
//! - **Descriptive statistics**: mean, median, sample variance and standard deviation
//! - **Moments**: central moments and sample skewness estimators
//! - **Standardization**: z-scores with the sample standard deviation
//! - **Regression**: ordinary least squares via the normal equations
//! - **Quantiles**: interpolated quantiles and central intervals for summaries
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`moments`]: Central moments and skewness
//! - [`standardize`]: Z-score standardization
//! - [`regression`]: Ordinary least squares fitting
//! - [`quantile`]: Interpolated quantiles and quantile bands
//!
//! # Examples
//!
//! ## Standardized regression coefficients
//!
//! ```
//! use skewbeta_stats::{regression::OrdinaryLeastSquares, standardize::standardize};
//!
//! let x = [0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
//! let y = [0.1, 1.2, -0.2, 0.8, 1.1, 0.3];
//! let zx = standardize(&x).unwrap();
//! let zy = standardize(&y).unwrap();
//!
//! let fit = OrdinaryLeastSquares::with_intercept().fit(&zy, &[&zx]).unwrap();
//! // With one predictor the standardized slope is the correlation coefficient.
//! assert!(fit.slopes[0] > 0.9 && fit.slopes[0] <= 1.0);
//! assert!(fit.intercept.unwrap().abs() < 1e-12);
//! ```
//!
//! ## Computing skewness
//!
//! ```
//! use skewbeta_stats::moments::SkewnessKind;
//!
//! let values = [0.0, 0.0, 0.0, 0.0, 1.0];
//! let skew = SkewnessKind::Moment.compute(&values).unwrap();
//! assert!(skew > 0.0);
//! ```

pub mod descriptive;
pub mod moments;
pub mod quantile;
pub mod regression;
pub mod standardize;
