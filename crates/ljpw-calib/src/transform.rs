use ljpw_core::errors::LjpwError;
use serde::{Deserialize, Serialize};

use crate::metrics::MetricField;

/// Normalization strategy mapping one raw metric onto `[0, 1]`.
///
/// The set is closed: a metric declares which strategy applies to it in the
/// calibration profile and the calibrator loop never branches on the metric
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// Higher is better; the value is already a proportion.
    Direct,
    /// Lower is better: `1 − value`.
    Inverted,
    /// Achievement ratio on `[0, ∞)`, saturating at 1.
    Saturating,
    /// Bounded ordinal rescale `(value − lo) / (hi − lo)`.
    Ordinal {
        /// Lowest score on the scale.
        lo: f64,
        /// Highest score on the scale.
        hi: f64,
    },
    /// Triangular peak at `optimum`: `max(0, 1 − |value − optimum| / optimum)`.
    OptimalPoint {
        /// Value at which the metric scores 1.
        optimum: f64,
    },
    /// Improvement over a baseline field: `max(0, 1 − value / baseline)`.
    BaselineImprovement {
        /// Field holding the baseline.
        baseline: MetricField,
    },
    /// Attainment of a target field: `min(1, target / max(value, 1))`.
    TargetAttainment {
        /// Field holding the target.
        target: MetricField,
    },
}

impl Transform {
    /// Checks the strategy's own parameters.
    pub fn validate(&self) -> Result<(), LjpwError> {
        match *self {
            Transform::Ordinal { lo, hi } if !(lo.is_finite() && hi.is_finite() && lo < hi) => {
                Err(LjpwError::configuration(
                    "ordinal-bounds",
                    format!("ordinal scale requires lo < hi, got [{lo}, {hi}]"),
                ))
            }
            Transform::OptimalPoint { optimum } if !(optimum.is_finite() && optimum > 0.0) => {
                Err(LjpwError::configuration(
                    "optimal-point",
                    format!("optimum must be positive, got {optimum}"),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Applies the strategy. `companion` carries the baseline or target value
    /// for the two strategies that read a second field and is ignored by the
    /// rest.
    pub fn apply(&self, value: f64, companion: Option<f64>) -> f64 {
        match *self {
            Transform::Direct => value,
            Transform::Inverted => 1.0 - value,
            Transform::Saturating => value.min(1.0),
            Transform::Ordinal { lo, hi } => (value - lo) / (hi - lo),
            Transform::OptimalPoint { optimum } => {
                (1.0 - (value - optimum).abs() / optimum).max(0.0)
            }
            Transform::BaselineImprovement { .. } => {
                let baseline = companion.unwrap_or(f64::NAN);
                (1.0 - value / baseline).max(0.0)
            }
            Transform::TargetAttainment { .. } => {
                let target = companion.unwrap_or(f64::NAN);
                (target / value.max(1.0)).min(1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_point_is_symmetric_and_clamped() {
        let t = Transform::OptimalPoint { optimum: 0.7 };
        assert!((t.apply(0.7, None) - 1.0).abs() < 1e-12);
        assert!((t.apply(0.35, None) - 0.5).abs() < 1e-12);
        assert!((t.apply(1.05, None) - 0.5).abs() < 1e-12);
        assert_eq!(t.apply(2.0, None), 0.0);
    }

    #[test]
    fn baseline_improvement_clamps_at_zero() {
        let t = Transform::BaselineImprovement {
            baseline: MetricField::BaselineOnboardingDays,
        };
        assert!((t.apply(4.0, Some(10.0)) - 0.6).abs() < 1e-12);
        assert_eq!(t.apply(15.0, Some(10.0)), 0.0);
    }

    #[test]
    fn target_attainment_saturates() {
        let t = Transform::TargetAttainment {
            target: MetricField::SlaTargetMs,
        };
        assert_eq!(t.apply(250.0, Some(500.0)), 1.0);
        assert!((t.apply(1000.0, Some(500.0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn invalid_parameters_are_configuration_errors() {
        assert!(Transform::Ordinal { lo: 7.0, hi: 1.0 }.validate().is_err());
        assert!(Transform::OptimalPoint { optimum: 0.0 }.validate().is_err());
        assert!(Transform::Ordinal { lo: 1.0, hi: 7.0 }.validate().is_ok());
    }
}
