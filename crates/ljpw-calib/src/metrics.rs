use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared natural range of a raw metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRange {
    /// Closed unit interval `[0, 1]` (rates and proportions).
    Unit,
    /// Bounded ordinal survey scale `[lo, hi]`.
    Ordinal {
        /// Lowest admissible score.
        lo: f64,
        /// Highest admissible score.
        hi: f64,
    },
    /// `[0, ∞)` (counts, durations, ratios).
    NonNegative,
    /// `(0, ∞)` (quantities used as divisors).
    Positive,
}

impl FieldRange {
    /// Whether `value` is finite and inside the range.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            FieldRange::Unit => (0.0..=1.0).contains(&value),
            FieldRange::Ordinal { lo, hi } => (lo..=hi).contains(&value),
            FieldRange::NonNegative => value >= 0.0,
            FieldRange::Positive => value > 0.0,
        }
    }
}

impl fmt::Display for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRange::Unit => write!(f, "[0, 1]"),
            FieldRange::Ordinal { lo, hi } => write!(f, "[{lo}, {hi}]"),
            FieldRange::NonNegative => write!(f, "[0, inf)"),
            FieldRange::Positive => write!(f, "(0, inf)"),
        }
    }
}

const SURVEY_SCALE: FieldRange = FieldRange::Ordinal { lo: 1.0, hi: 7.0 };

/// Key of a field in a [`RawMetricBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    /// Share of commits reviewed by someone other than the author.
    CrossReviewRate,
    /// Share of API calls that error.
    ApiErrorRate,
    /// Share of public APIs that are documented.
    DocCoverage,
    /// Psychological safety survey score (1-7).
    PsychSafetyScore,
    /// Share of lines covered by tests.
    LineCoverage,
    /// Share of branches covered by tests.
    BranchCoverage,
    /// Share of architecture checks that fail.
    ArchitectureViolations,
    /// Share of files compliant with code standards.
    CodeStandardsCompliance,
    /// Share of time spent servicing technical debt.
    TechDebtTimeRatio,
    /// Delivered over committed points.
    VelocityAchievement,
    /// 95th percentile response time in milliseconds.
    P95ResponseTimeMs,
    /// Latency target in milliseconds.
    SlaTargetMs,
    /// Average CPU utilization.
    CpuUtilization,
    /// Documentation lines over code lines.
    DocToCodeRatio,
    /// Days until a new member's first commit.
    OnboardingDays,
    /// Reference onboarding duration in days.
    BaselineOnboardingDays,
    /// Share of changes confined to a single module.
    ChangeIsolationRate,
    /// Knowledge retention survey score (1-7).
    KnowledgeRetentionScore,
}

impl MetricField {
    /// Every field in bundle order.
    pub const ALL: [MetricField; 18] = [
        MetricField::CrossReviewRate,
        MetricField::ApiErrorRate,
        MetricField::DocCoverage,
        MetricField::PsychSafetyScore,
        MetricField::LineCoverage,
        MetricField::BranchCoverage,
        MetricField::ArchitectureViolations,
        MetricField::CodeStandardsCompliance,
        MetricField::TechDebtTimeRatio,
        MetricField::VelocityAchievement,
        MetricField::P95ResponseTimeMs,
        MetricField::SlaTargetMs,
        MetricField::CpuUtilization,
        MetricField::DocToCodeRatio,
        MetricField::OnboardingDays,
        MetricField::BaselineOnboardingDays,
        MetricField::ChangeIsolationRate,
        MetricField::KnowledgeRetentionScore,
    ];

    /// Serialized key of the field.
    pub const fn name(self) -> &'static str {
        match self {
            MetricField::CrossReviewRate => "cross_review_rate",
            MetricField::ApiErrorRate => "api_error_rate",
            MetricField::DocCoverage => "doc_coverage",
            MetricField::PsychSafetyScore => "psych_safety_score",
            MetricField::LineCoverage => "line_coverage",
            MetricField::BranchCoverage => "branch_coverage",
            MetricField::ArchitectureViolations => "architecture_violations",
            MetricField::CodeStandardsCompliance => "code_standards_compliance",
            MetricField::TechDebtTimeRatio => "tech_debt_time_ratio",
            MetricField::VelocityAchievement => "velocity_achievement",
            MetricField::P95ResponseTimeMs => "p95_response_time_ms",
            MetricField::SlaTargetMs => "sla_target_ms",
            MetricField::CpuUtilization => "cpu_utilization",
            MetricField::DocToCodeRatio => "doc_to_code_ratio",
            MetricField::OnboardingDays => "onboarding_days",
            MetricField::BaselineOnboardingDays => "baseline_onboarding_days",
            MetricField::ChangeIsolationRate => "change_isolation_rate",
            MetricField::KnowledgeRetentionScore => "knowledge_retention_score",
        }
    }

    /// Declared natural range of the field.
    pub const fn range(self) -> FieldRange {
        match self {
            MetricField::PsychSafetyScore | MetricField::KnowledgeRetentionScore => SURVEY_SCALE,
            MetricField::VelocityAchievement
            | MetricField::P95ResponseTimeMs
            | MetricField::SlaTargetMs
            | MetricField::DocToCodeRatio
            | MetricField::OnboardingDays => FieldRange::NonNegative,
            MetricField::BaselineOnboardingDays => FieldRange::Positive,
            _ => FieldRange::Unit,
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Externally observed metrics for one system.
///
/// Fields are optional so that an absent key survives deserialization and is
/// reported by the calibrator against the exact field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMetricBundle {
    /// See [`MetricField::CrossReviewRate`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_review_rate: Option<f64>,
    /// See [`MetricField::ApiErrorRate`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_error_rate: Option<f64>,
    /// See [`MetricField::DocCoverage`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_coverage: Option<f64>,
    /// See [`MetricField::PsychSafetyScore`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psych_safety_score: Option<f64>,
    /// See [`MetricField::LineCoverage`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_coverage: Option<f64>,
    /// See [`MetricField::BranchCoverage`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_coverage: Option<f64>,
    /// See [`MetricField::ArchitectureViolations`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture_violations: Option<f64>,
    /// See [`MetricField::CodeStandardsCompliance`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_standards_compliance: Option<f64>,
    /// See [`MetricField::TechDebtTimeRatio`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_debt_time_ratio: Option<f64>,
    /// See [`MetricField::VelocityAchievement`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_achievement: Option<f64>,
    /// See [`MetricField::P95ResponseTimeMs`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95_response_time_ms: Option<f64>,
    /// See [`MetricField::SlaTargetMs`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_target_ms: Option<f64>,
    /// See [`MetricField::CpuUtilization`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_utilization: Option<f64>,
    /// See [`MetricField::DocToCodeRatio`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_to_code_ratio: Option<f64>,
    /// See [`MetricField::OnboardingDays`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_days: Option<f64>,
    /// See [`MetricField::BaselineOnboardingDays`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_onboarding_days: Option<f64>,
    /// See [`MetricField::ChangeIsolationRate`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_isolation_rate: Option<f64>,
    /// See [`MetricField::KnowledgeRetentionScore`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_retention_score: Option<f64>,
}

impl RawMetricBundle {
    /// Value recorded for `field`, if any.
    pub fn get(&self, field: MetricField) -> Option<f64> {
        *self.slot(field)
    }

    /// Builder-style setter used by ingestion code and tests.
    pub fn with(mut self, field: MetricField, value: f64) -> Self {
        *self.slot_mut(field) = Some(value);
        self
    }

    /// Returns a copy with `field` removed.
    pub fn without(mut self, field: MetricField) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    fn slot(&self, field: MetricField) -> &Option<f64> {
        match field {
            MetricField::CrossReviewRate => &self.cross_review_rate,
            MetricField::ApiErrorRate => &self.api_error_rate,
            MetricField::DocCoverage => &self.doc_coverage,
            MetricField::PsychSafetyScore => &self.psych_safety_score,
            MetricField::LineCoverage => &self.line_coverage,
            MetricField::BranchCoverage => &self.branch_coverage,
            MetricField::ArchitectureViolations => &self.architecture_violations,
            MetricField::CodeStandardsCompliance => &self.code_standards_compliance,
            MetricField::TechDebtTimeRatio => &self.tech_debt_time_ratio,
            MetricField::VelocityAchievement => &self.velocity_achievement,
            MetricField::P95ResponseTimeMs => &self.p95_response_time_ms,
            MetricField::SlaTargetMs => &self.sla_target_ms,
            MetricField::CpuUtilization => &self.cpu_utilization,
            MetricField::DocToCodeRatio => &self.doc_to_code_ratio,
            MetricField::OnboardingDays => &self.onboarding_days,
            MetricField::BaselineOnboardingDays => &self.baseline_onboarding_days,
            MetricField::ChangeIsolationRate => &self.change_isolation_rate,
            MetricField::KnowledgeRetentionScore => &self.knowledge_retention_score,
        }
    }

    fn slot_mut(&mut self, field: MetricField) -> &mut Option<f64> {
        match field {
            MetricField::CrossReviewRate => &mut self.cross_review_rate,
            MetricField::ApiErrorRate => &mut self.api_error_rate,
            MetricField::DocCoverage => &mut self.doc_coverage,
            MetricField::PsychSafetyScore => &mut self.psych_safety_score,
            MetricField::LineCoverage => &mut self.line_coverage,
            MetricField::BranchCoverage => &mut self.branch_coverage,
            MetricField::ArchitectureViolations => &mut self.architecture_violations,
            MetricField::CodeStandardsCompliance => &mut self.code_standards_compliance,
            MetricField::TechDebtTimeRatio => &mut self.tech_debt_time_ratio,
            MetricField::VelocityAchievement => &mut self.velocity_achievement,
            MetricField::P95ResponseTimeMs => &mut self.p95_response_time_ms,
            MetricField::SlaTargetMs => &mut self.sla_target_ms,
            MetricField::CpuUtilization => &mut self.cpu_utilization,
            MetricField::DocToCodeRatio => &mut self.doc_to_code_ratio,
            MetricField::OnboardingDays => &mut self.onboarding_days,
            MetricField::BaselineOnboardingDays => &mut self.baseline_onboarding_days,
            MetricField::ChangeIsolationRate => &mut self.change_isolation_rate,
            MetricField::KnowledgeRetentionScore => &mut self.knowledge_retention_score,
        }
    }
}
