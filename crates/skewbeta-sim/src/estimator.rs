//! Pluggable estimation capabilities used by the simulator.
//!
//! The simulator only needs two things from a statistics library: slope
//! coefficients of a linear fit and a skewness statistic. Both are expressed as
//! traits here, with default implementations backed by `skewbeta-stats`.

use skewbeta_stats::{
    moments::SkewnessKind,
    regression::{FitError, OrdinaryLeastSquares},
};

/// Fits a linear model and returns one slope per predictor.
pub trait CoefficientFitter {
    /// Returns the slope coefficients of `response` on `predictors`, in predictor order.
    ///
    /// Any intercept the model includes is estimated but not returned.
    fn fit_slopes(&self, response: &[f64], predictors: &[&[f64]]) -> Result<Vec<f64>, FitError>;
}

impl CoefficientFitter for OrdinaryLeastSquares {
    fn fit_slopes(&self, response: &[f64], predictors: &[&[f64]]) -> Result<Vec<f64>, FitError> {
        Ok(self.fit(response, predictors)?.slopes)
    }
}

/// Computes a sample skewness statistic.
pub trait SkewnessStatistic {
    /// Returns the skewness of `values`, or `None` when it is undefined.
    fn skewness(&self, values: &[f64]) -> Option<f64>;
}

impl SkewnessStatistic for SkewnessKind {
    fn skewness(&self, values: &[f64]) -> Option<f64> {
        self.compute(values)
    }
}
