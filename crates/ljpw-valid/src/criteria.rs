use ljpw_core::errors::{ErrorInfo, LjpwError};
use serde::{Deserialize, Serialize};

fn default_expected() -> f64 {
    1.4
}

fn default_tolerance() -> f64 {
    0.2
}

fn default_min_r_squared() -> f64 {
    0.6
}

fn default_significance() -> f64 {
    0.05
}

fn default_prior_std() -> f64 {
    0.2
}

fn default_confidence() -> f64 {
    0.95
}

fn default_min_validation_rate() -> f64 {
    0.75
}

fn default_min_posterior_probability() -> f64 {
    0.80
}

/// Acceptance thresholds for a coupling coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceCriteria {
    /// Hypothesised coefficient; also the prior mean.
    #[serde(default = "default_expected")]
    pub expected: f64,
    /// Half-width of the accepted band around `expected`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// A fit needs strictly more than this R².
    #[serde(default = "default_min_r_squared")]
    pub min_r_squared: f64,
    /// A fit needs a p-value strictly below this.
    #[serde(default = "default_significance")]
    pub significance: f64,
    /// Prior standard deviation.
    #[serde(default = "default_prior_std")]
    pub prior_std: f64,
    /// Level of the confidence and credible intervals.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Minimum share of validated domains.
    #[serde(default = "default_min_validation_rate")]
    pub min_validation_rate: f64,
    /// The posterior mass in the band must exceed this.
    #[serde(default = "default_min_posterior_probability")]
    pub min_posterior_probability: f64,
}

impl Default for AcceptanceCriteria {
    fn default() -> Self {
        Self {
            expected: default_expected(),
            tolerance: default_tolerance(),
            min_r_squared: default_min_r_squared(),
            significance: default_significance(),
            prior_std: default_prior_std(),
            confidence: default_confidence(),
            min_validation_rate: default_min_validation_rate(),
            min_posterior_probability: default_min_posterior_probability(),
        }
    }
}

fn criteria_error(field: &str, value: f64, message: &str) -> LjpwError {
    LjpwError::Configuration(
        ErrorInfo::new("invalid-criteria", message)
            .with_context("field", field)
            .with_context("value", value.to_string()),
    )
}

/// Relative widening applied to both band edges by
/// [`AcceptanceCriteria::in_range`].
pub const BAND_SLACK: f64 = 1e-12;

impl AcceptanceCriteria {
    /// Lower edge of the accepted band.
    pub fn lower_bound(&self) -> f64 {
        self.expected - self.tolerance
    }

    /// Upper edge of the accepted band.
    pub fn upper_bound(&self) -> f64 {
        self.expected + self.tolerance
    }

    /// Whether `value` lies inside the accepted band, both edges included.
    ///
    /// The edges are widened by [`BAND_SLACK`] so that decimal edges such as
    /// `1.4 + 0.2` still admit `1.6` after rounding.
    pub fn in_range(&self, value: f64) -> bool {
        let slack = BAND_SLACK * self.expected.abs().max(1.0);
        value >= self.lower_bound() - slack && value <= self.upper_bound() + slack
    }

    /// Two-sided tail probability for the configured confidence level,
    /// e.g. `0.975` for 95%.
    pub fn upper_quantile(&self) -> f64 {
        1.0 - (1.0 - self.confidence) / 2.0
    }

    /// Rejects non-finite values and out-of-domain levels.
    pub fn validate(&self) -> Result<(), LjpwError> {
        if !self.expected.is_finite() {
            return Err(criteria_error("expected", self.expected, "must be finite"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(criteria_error("tolerance", self.tolerance, "must be positive"));
        }
        if !(self.prior_std.is_finite() && self.prior_std > 0.0) {
            return Err(criteria_error("prior_std", self.prior_std, "must be positive"));
        }
        for (field, value) in [
            ("min_r_squared", self.min_r_squared),
            ("min_validation_rate", self.min_validation_rate),
            ("min_posterior_probability", self.min_posterior_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(criteria_error(field, value, "must lie in [0, 1]"));
            }
        }
        for (field, value) in [
            ("significance", self.significance),
            ("confidence", self.confidence),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(criteria_error(field, value, "must lie in (0, 1)"));
            }
        }
        Ok(())
    }
}
