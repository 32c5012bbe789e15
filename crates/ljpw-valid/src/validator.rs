use ljpw_core::errors::{ErrorInfo, LjpwError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bayes::{bayesian_update, PosteriorSummary};
use crate::criteria::AcceptanceCriteria;
use crate::cross::{cross_domain, CrossDomainSummary};
use crate::fit::{fit_domain, CoefficientFit, Domain};

/// Final decision on a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Enough domains validate and the posterior sits in the band.
    Validated,
    /// Otherwise.
    NotValidated,
}

/// Everything produced by [`CoefficientValidator::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Criteria the report was produced under.
    pub criteria: AcceptanceCriteria,
    /// Per-domain fits in input order.
    pub fits: Vec<CoefficientFit>,
    /// Cross-domain statistics.
    pub cross_domain: CrossDomainSummary,
    /// Bayesian posterior.
    pub posterior: PosteriorSummary,
    /// Final decision.
    pub verdict: Verdict,
}

/// Applies the verdict rule to a summary and posterior.
pub fn verdict(
    summary: &CrossDomainSummary,
    posterior: &PosteriorSummary,
    criteria: &AcceptanceCriteria,
) -> Verdict {
    if summary.validation_rate >= criteria.min_validation_rate
        && posterior.probability_in_range > criteria.min_posterior_probability
    {
        Verdict::Validated
    } else {
        Verdict::NotValidated
    }
}

/// Runs the fit, aggregation and update pipeline under fixed criteria.
#[derive(Debug, Clone, Default)]
pub struct CoefficientValidator {
    criteria: AcceptanceCriteria,
    threads: Option<usize>,
}

impl CoefficientValidator {
    /// Validates `criteria` and builds a validator.
    pub fn new(criteria: AcceptanceCriteria) -> Result<Self, LjpwError> {
        criteria.validate()?;
        Ok(Self {
            criteria,
            threads: None,
        })
    }

    /// Caps the worker pool used by [`fit_all`](Self::fit_all).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    /// Active criteria.
    pub fn criteria(&self) -> &AcceptanceCriteria {
        &self.criteria
    }

    /// Fits one domain.
    pub fn fit(&self, domain: &Domain) -> Result<CoefficientFit, LjpwError> {
        fit_domain(&domain.name, &domain.observations, &self.criteria)
    }

    /// Fits every domain in parallel and returns the fits in input order.
    /// The error of the earliest failing domain is returned.
    pub fn fit_all(&self, domains: &[Domain]) -> Result<Vec<CoefficientFit>, LjpwError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|err| {
            LjpwError::Configuration(ErrorInfo::new("thread-pool", err.to_string()))
        })?;

        let mut results: Vec<(usize, Result<CoefficientFit, LjpwError>)> = pool.install(|| {
            domains
                .par_iter()
                .enumerate()
                .map(|(index, domain)| (index, self.fit(domain)))
                .collect()
        });
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, fit)| fit).collect()
    }

    /// Cross-domain summary of existing fits.
    pub fn cross_domain(&self, fits: &[CoefficientFit]) -> Result<CrossDomainSummary, LjpwError> {
        cross_domain(fits, &self.criteria)
    }

    /// Posterior of existing fits.
    pub fn bayesian_update(&self, fits: &[CoefficientFit]) -> Result<PosteriorSummary, LjpwError> {
        bayesian_update(fits, &self.criteria)
    }

    /// Full pipeline over `domains`.
    pub fn validate(&self, domains: &[Domain]) -> Result<ValidationReport, LjpwError> {
        let fits = self.fit_all(domains)?;
        for fit in fits.iter().filter(|fit| !fit.valid) {
            log::warn!(
                "domain {} failed validation: kappa={:.3} in_range={} r2={:.3} p={:.3e}",
                fit.domain,
                fit.coefficient,
                fit.in_range,
                fit.r_squared,
                fit.p_value
            );
        }
        let cross_domain = self.cross_domain(&fits)?;
        let posterior = self.bayesian_update(&fits)?;
        let verdict = verdict(&cross_domain, &posterior, &self.criteria);
        log::info!(
            "coefficient {:?}: rate={:.2} posterior={:.3}±{:.3} p_in_range={:.3}",
            verdict,
            cross_domain.validation_rate,
            posterior.posterior_mean,
            posterior.posterior_std,
            posterior.probability_in_range
        );
        Ok(ValidationReport {
            criteria: self.criteria,
            fits,
            cross_domain,
            posterior,
            verdict,
        })
    }
}
