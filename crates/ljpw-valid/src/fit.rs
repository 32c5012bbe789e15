//! For every observation the amplification ratio `effective / base` is
//! regressed on the source axis value; under
//! `effective = base · (1 + κ · source)` the slope estimates `κ` and the
//! intercept sits near one.

use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::serde::stable_hash_string;
use serde::{Deserialize, Serialize};

use crate::criteria::AcceptanceCriteria;
use crate::stats::{linear_regression, t_quantile};

/// Paired observations from one domain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainObservations {
    /// Source axis values.
    pub source: Vec<f64>,
    /// Target axis values before amplification.
    pub base: Vec<f64>,
    /// Observed effective target values.
    pub effective: Vec<f64>,
}

impl DomainObservations {
    /// Number of observations, assuming equal lengths.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Appends one observation.
    pub fn push(&mut self, source: f64, base: f64, effective: f64) {
        self.source.push(source);
        self.base.push(base);
        self.effective.push(effective);
    }

    /// Amplification ratios after checking shape and values.
    pub fn ratios(&self) -> Result<Vec<f64>, LjpwError> {
        let (s, b, e) = (self.source.len(), self.base.len(), self.effective.len());
        if s != b || s != e {
            return Err(LjpwError::InsufficientData(
                ErrorInfo::new("mismatched-lengths", "observation arrays differ in length")
                    .with_context("source", s.to_string())
                    .with_context("base", b.to_string())
                    .with_context("effective", e.to_string()),
            ));
        }
        if s < 3 {
            return Err(LjpwError::InsufficientData(
                ErrorInfo::new("too-few-observations", "at least three observations are needed")
                    .with_context("n", s.to_string()),
            ));
        }
        let mut ratios = Vec::with_capacity(s);
        for (index, ((&source, &base), &effective)) in self
            .source
            .iter()
            .zip(&self.base)
            .zip(&self.effective)
            .enumerate()
        {
            if !(source.is_finite() && base.is_finite() && effective.is_finite()) || base == 0.0 {
                return Err(LjpwError::InsufficientData(
                    ErrorInfo::new(
                        "invalid-observation",
                        "observations must be finite with a non-zero base",
                    )
                    .with_context("index", index.to_string())
                    .with_context("base", base.to_string()),
                ));
            }
            ratios.push(effective / base);
        }
        Ok(ratios)
    }
}

/// A named domain and its observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name.
    pub name: String,
    /// Observations.
    pub observations: DomainObservations,
}

impl Domain {
    /// Pairs a name with observations.
    pub fn new(name: impl Into<String>, observations: DomainObservations) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }
}

/// Closed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Interval {
    /// `center ± half_width`.
    pub fn centered(center: f64, half_width: f64) -> Self {
        Self {
            lower: center - half_width,
            upper: center + half_width,
        }
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// `upper − lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Regression result for one domain plus its acceptance flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientFit {
    /// Domain name.
    pub domain: String,
    /// Fitted coefficient (slope).
    pub coefficient: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Hypothesised coefficient.
    pub expected: f64,
    /// Standard error of the slope.
    pub std_error: f64,
    /// t-based confidence interval of the slope.
    pub confidence_interval: Interval,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Two-sided p-value for a non-zero slope.
    pub p_value: f64,
    /// Cohen's f²; absent for a perfect fit.
    pub effect_size: Option<f64>,
    /// Number of observations.
    pub sample_size: usize,
    /// Coefficient within tolerance of the expected value.
    pub in_range: bool,
    /// R² above the minimum.
    pub good_fit: bool,
    /// p-value below the significance level.
    pub significant: bool,
    /// All three flags hold.
    pub valid: bool,
    /// Hash of the domain name, observations and criteria.
    pub fit_hash: String,
}

/// Fits one domain against `criteria`.
pub fn fit_domain(
    name: &str,
    observations: &DomainObservations,
    criteria: &AcceptanceCriteria,
) -> Result<CoefficientFit, LjpwError> {
    let ratios = observations.ratios()?;
    let regression = linear_regression(&observations.source, &ratios)?;

    let t_crit = t_quantile(criteria.upper_quantile(), regression.df as f64)?;
    let confidence_interval = Interval::centered(regression.slope, t_crit * regression.std_err);
    let effect_size = if regression.r_squared < 1.0 {
        Some(regression.r_squared / (1.0 - regression.r_squared))
    } else {
        None
    };

    let in_range = criteria.in_range(regression.slope);
    let good_fit = regression.r_squared > criteria.min_r_squared;
    let significant = regression.p_value < criteria.significance;
    let fit_hash = stable_hash_string(&(name, observations, criteria))?;

    log::debug!(
        "fitted {name}: kappa={:.4} se={:.4} r2={:.3} p={:.3e} n={}",
        regression.slope,
        regression.std_err,
        regression.r_squared,
        regression.p_value,
        ratios.len()
    );

    Ok(CoefficientFit {
        domain: name.to_string(),
        coefficient: regression.slope,
        intercept: regression.intercept,
        expected: criteria.expected,
        std_error: regression.std_err,
        confidence_interval,
        r_squared: regression.r_squared,
        p_value: regression.p_value,
        effect_size,
        sample_size: ratios.len(),
        in_range,
        good_fit,
        significant,
        valid: in_range && good_fit && significant,
        fit_hash,
    })
}
