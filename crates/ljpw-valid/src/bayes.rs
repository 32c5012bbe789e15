use ljpw_core::errors::{ErrorInfo, LjpwError};
use serde::{Deserialize, Serialize};

use crate::criteria::AcceptanceCriteria;
use crate::cross::require_domains;
use crate::fit::{CoefficientFit, Interval};
use crate::stats::{normal_cdf, normal_quantile};

/// Prior, pooled evidence and posterior of the coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    /// Prior mean.
    pub prior_mean: f64,
    /// Prior standard deviation.
    pub prior_std: f64,
    /// Precision-weighted mean of the domain coefficients alone.
    pub pooled_mean: f64,
    /// Posterior mean.
    pub posterior_mean: f64,
    /// Posterior standard deviation.
    pub posterior_std: f64,
    /// Central credible interval at the configured level.
    pub credible_interval: Interval,
    /// Posterior mass inside the accepted band.
    pub probability_in_range: f64,
}

/// Updates `N(expected, prior_std²)` with each fit treated as a normal
/// measurement with variance `std_error²`.
pub fn bayesian_update(
    fits: &[CoefficientFit],
    criteria: &AcceptanceCriteria,
) -> Result<PosteriorSummary, LjpwError> {
    require_domains(fits)?;
    for fit in fits {
        if !(fit.std_error.is_finite() && fit.std_error > 0.0) {
            return Err(LjpwError::InsufficientData(
                ErrorInfo::new(
                    "degenerate-standard-error",
                    "a fit with zero standard error cannot be weighted",
                )
                .with_context("domain", fit.domain.clone())
                .with_context("std_error", fit.std_error.to_string()),
            ));
        }
    }

    let prior_precision = 1.0 / criteria.prior_std.powi(2);
    let (data_precision, weighted_sum) = fits.iter().fold((0.0, 0.0), |(p, s), fit| {
        let w = 1.0 / fit.std_error.powi(2);
        (p + w, s + w * fit.coefficient)
    });
    let pooled_mean = weighted_sum / data_precision;

    let posterior_precision = prior_precision + data_precision;
    let posterior_mean =
        (prior_precision * criteria.expected + weighted_sum) / posterior_precision;
    let posterior_std = posterior_precision.sqrt().recip();

    let tail = (1.0 - criteria.confidence) / 2.0;
    let credible_interval = Interval {
        lower: normal_quantile(tail, posterior_mean, posterior_std)?,
        upper: normal_quantile(1.0 - tail, posterior_mean, posterior_std)?,
    };
    let probability_in_range = normal_cdf(criteria.upper_bound(), posterior_mean, posterior_std)?
        - normal_cdf(criteria.lower_bound(), posterior_mean, posterior_std)?;

    Ok(PosteriorSummary {
        prior_mean: criteria.expected,
        prior_std: criteria.prior_std,
        pooled_mean,
        posterior_mean,
        posterior_std,
        credible_interval,
        probability_in_range,
    })
}
