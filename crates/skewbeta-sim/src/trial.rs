//! Per-trial results.

use skewbeta_stats::{
    regression::FitError,
    standardize::{StandardizeError, standardize},
};

use crate::{
    estimator::{CoefficientFitter, SkewnessStatistic},
    sampler::TrialSample,
};

/// A variable of the trial's standardized model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Variable {
    #[display("y")]
    Outcome,
    #[display("x_const")]
    ConstSkewRegressor,
    #[display("x_var")]
    VarSkewRegressor,
}

/// Standardized coefficients of the two regressors.
///
/// Both values are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientPair {
    /// Standardized coefficient of the constant-skew regressor.
    pub beta_const: f64,
    /// Standardized coefficient of the varying-skew regressor.
    pub beta_var: f64,
}

/// Why a trial has no coefficient estimates.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum UndefinedReason {
    #[display("{variable} cannot be standardized: {source}")]
    Degenerate {
        variable: Variable,
        source: StandardizeError,
    },
    #[display("least squares fit failed: {source}")]
    FitFailed { source: FitError },
    #[display("fitter returned {actual} coefficients, expected 2")]
    CoefficientCount { actual: usize },
}

/// Outcome of estimating a trial's standardized model.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum TrialEstimate {
    Estimated(CoefficientPair),
    Undefined(UndefinedReason),
}

impl TrialEstimate {
    /// Returns the coefficients if the estimate is defined.
    #[must_use]
    pub fn coefficients(&self) -> Option<CoefficientPair> {
        match self {
            Self::Estimated(pair) => Some(*pair),
            Self::Undefined(_) => None,
        }
    }

    /// Returns the reason the estimate is undefined, if it is.
    #[must_use]
    pub fn undefined_reason(&self) -> Option<&UndefinedReason> {
        match self {
            Self::Estimated(_) => None,
            Self::Undefined(reason) => Some(reason),
        }
    }
}

impl From<Result<CoefficientPair, UndefinedReason>> for TrialEstimate {
    fn from(result: Result<CoefficientPair, UndefinedReason>) -> Self {
        match result {
            Ok(pair) => Self::Estimated(pair),
            Err(reason) => Self::Undefined(reason),
        }
    }
}

/// One completed simulation round.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    /// 1-based trial index.
    pub index: usize,
    /// Success probability used for the varying regressor.
    pub mixing_fraction: f64,
    /// Sample skewness of the raw varying regressor (`None` if it is constant).
    pub skewness_of_x_var: Option<f64>,
    /// Standardized coefficients, or why they could not be estimated.
    pub estimate: TrialEstimate,
}

impl Trial {
    /// Evaluates a generated sample: skewness of `x_var` and the standardized fit.
    pub fn evaluate<F, S>(
        index: usize,
        mixing_fraction: f64,
        sample: &TrialSample,
        fitter: &F,
        skewness: &S,
    ) -> Self
    where
        F: CoefficientFitter + ?Sized,
        S: SkewnessStatistic + ?Sized,
    {
        Self {
            index,
            mixing_fraction,
            skewness_of_x_var: skewness.skewness(&sample.x_var),
            estimate: estimate_standardized(sample, fitter).into(),
        }
    }
}

/// Standardizes outcome and regressors, then fits the outcome on both regressors.
pub fn estimate_standardized<F>(
    sample: &TrialSample,
    fitter: &F,
) -> Result<CoefficientPair, UndefinedReason>
where
    F: CoefficientFitter + ?Sized,
{
    let z = |variable, values: &[f64]| {
        standardize(values).map_err(|source| UndefinedReason::Degenerate { variable, source })
    };
    let x_var = z(Variable::VarSkewRegressor, &sample.x_var)?;
    let x_const = z(Variable::ConstSkewRegressor, &sample.x_const)?;
    let y = z(Variable::Outcome, &sample.y)?;

    let slopes = fitter
        .fit_slopes(&y, &[&x_const, &x_var])
        .map_err(|source| UndefinedReason::FitFailed { source })?;
    let [beta_const, beta_var] = slopes[..] else {
        return Err(UndefinedReason::CoefficientCount {
            actual: slopes.len(),
        });
    };
    if !beta_const.is_finite() || !beta_var.is_finite() {
        return Err(UndefinedReason::FitFailed {
            source: FitError::NonFinite,
        });
    }
    Ok(CoefficientPair {
        beta_const,
        beta_var,
    })
}
