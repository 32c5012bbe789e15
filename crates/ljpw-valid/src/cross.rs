use ljpw_core::errors::{ErrorInfo, LjpwError};
use serde::{Deserialize, Serialize};

use crate::criteria::AcceptanceCriteria;
use crate::fit::{CoefficientFit, Interval};
use crate::stats::{mean, sample_std, t_quantile};

/// Summary statistics over per-domain coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossDomainSummary {
    /// Mean fitted coefficient.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Sample variance.
    pub variance: f64,
    /// Standard error of the mean.
    pub sem: f64,
    /// t-based confidence interval of the mean.
    pub confidence_interval: Interval,
    /// `max(0, 1 − std / tolerance)`.
    pub consistency: f64,
    /// Number of fits.
    pub domains_tested: usize,
    /// Number of fits flagged valid.
    pub domains_validated: usize,
    /// `domains_validated / domains_tested`.
    pub validation_rate: f64,
}

pub(crate) fn require_domains(fits: &[CoefficientFit]) -> Result<(), LjpwError> {
    if fits.len() < 2 {
        return Err(LjpwError::InsufficientDomains(
            ErrorInfo::new("too-few-domains", "at least two domains are required")
                .with_context("domains", fits.len().to_string())
                .with_hint("fit more domains before aggregating"),
        ));
    }
    Ok(())
}

/// Aggregates at least two fits.
pub fn cross_domain(
    fits: &[CoefficientFit],
    criteria: &AcceptanceCriteria,
) -> Result<CrossDomainSummary, LjpwError> {
    require_domains(fits)?;
    let coefficients: Vec<f64> = fits.iter().map(|fit| fit.coefficient).collect();
    let k = coefficients.len();

    let mean = mean(&coefficients);
    let std = sample_std(&coefficients);
    let sem = std / (k as f64).sqrt();
    let t_crit = t_quantile(criteria.upper_quantile(), (k - 1) as f64)?;
    let domains_validated = fits.iter().filter(|fit| fit.valid).count();

    Ok(CrossDomainSummary {
        mean,
        std,
        variance: std * std,
        sem,
        confidence_interval: Interval::centered(mean, t_crit * sem),
        consistency: (1.0 - std / criteria.tolerance).max(0.0),
        domains_tested: k,
        domains_validated,
        validation_rate: domains_validated as f64 / k as f64,
    })
}
