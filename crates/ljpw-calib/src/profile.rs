use std::collections::BTreeMap;

use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::Axis;
use serde::{Deserialize, Serialize};

use crate::metrics::MetricField;
use crate::transform::Transform;

/// One raw field normalized by one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Raw field read from the bundle.
    pub field: MetricField,
    /// Normalization applied to the field.
    pub transform: Transform,
}

impl Term {
    /// Convenience constructor.
    pub fn new(field: MetricField, transform: Transform) -> Self {
        Self { field, transform }
    }
}

/// Named sub-metric; its score is the mean of its terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMetric {
    /// Label reported in calibration breakdowns.
    pub label: String,
    /// Normalized terms averaged into the sub-metric.
    pub terms: Vec<Term>,
}

impl SubMetric {
    /// Sub-metric backed by a single term.
    pub fn single(label: &str, field: MetricField, transform: Transform) -> Self {
        Self {
            label: label.to_string(),
            terms: vec![Term::new(field, transform)],
        }
    }
}

/// Declares which sub-metrics feed each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Sub-metrics per axis.
    pub axes: BTreeMap<Axis, Vec<SubMetric>>,
}

/// Utilization ratio at which capacity is considered optimal.
pub const OPTIMAL_CPU_UTILIZATION: f64 = 0.70;
/// Documentation-to-code ratio considered optimal.
pub const OPTIMAL_DOC_RATIO: f64 = 0.40;

impl CalibrationProfile {
    /// The software-team profile.
    pub fn software_team() -> Self {
        use MetricField as F;
        use Transform as T;

        let survey = T::Ordinal { lo: 1.0, hi: 7.0 };
        let mut axes = BTreeMap::new();
        axes.insert(
            Axis::Love,
            vec![
                SubMetric::single("connectivity", F::CrossReviewRate, T::Direct),
                SubMetric::single("usability", F::ApiErrorRate, T::Inverted),
                SubMetric::single("documentation", F::DocCoverage, T::Direct),
                SubMetric::single("psych_safety", F::PsychSafetyScore, survey),
            ],
        );
        axes.insert(
            Axis::Justice,
            vec![
                SubMetric {
                    label: "test_coverage".to_string(),
                    terms: vec![
                        Term::new(F::LineCoverage, T::Direct),
                        Term::new(F::BranchCoverage, T::Direct),
                    ],
                },
                SubMetric::single("consistency", F::ArchitectureViolations, T::Inverted),
                SubMetric::single("standards", F::CodeStandardsCompliance, T::Direct),
                SubMetric::single("debt", F::TechDebtTimeRatio, T::Inverted),
            ],
        );
        axes.insert(
            Axis::Power,
            vec![
                SubMetric::single("velocity", F::VelocityAchievement, T::Saturating),
                SubMetric::single(
                    "performance",
                    F::P95ResponseTimeMs,
                    T::TargetAttainment {
                        target: F::SlaTargetMs,
                    },
                ),
                SubMetric::single(
                    "scalability",
                    F::CpuUtilization,
                    T::OptimalPoint {
                        optimum: OPTIMAL_CPU_UTILIZATION,
                    },
                ),
            ],
        );
        axes.insert(
            Axis::Wisdom,
            vec![
                SubMetric::single(
                    "doc_ratio",
                    F::DocToCodeRatio,
                    T::OptimalPoint {
                        optimum: OPTIMAL_DOC_RATIO,
                    },
                ),
                SubMetric::single(
                    "onboarding",
                    F::OnboardingDays,
                    T::BaselineImprovement {
                        baseline: F::BaselineOnboardingDays,
                    },
                ),
                SubMetric::single("isolation", F::ChangeIsolationRate, T::Direct),
                SubMetric::single("knowledge", F::KnowledgeRetentionScore, survey),
            ],
        );
        Self { axes }
    }

    /// Sub-metrics declared for `axis` (empty if the axis is missing).
    pub fn sub_metrics(&self, axis: Axis) -> &[SubMetric] {
        self.axes.get(&axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rejects profiles the calibrator cannot evaluate.
    pub fn validate(&self) -> Result<(), LjpwError> {
        for axis in Axis::ALL {
            let subs = self.sub_metrics(axis);
            if subs.is_empty() {
                return Err(LjpwError::Configuration(
                    ErrorInfo::new("empty-axis", "every axis needs at least one sub-metric")
                        .with_context("axis", axis.label()),
                ));
            }
            for sub in subs {
                if sub.terms.is_empty() {
                    return Err(LjpwError::Configuration(
                        ErrorInfo::new("empty-sub-metric", "sub-metric declares no terms")
                            .with_context("axis", axis.label())
                            .with_context("sub_metric", sub.label.clone()),
                    ));
                }
                for term in &sub.terms {
                    term.transform.validate()?;
                }
            }
        }
        Ok(())
    }
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::software_team()
    }
}
