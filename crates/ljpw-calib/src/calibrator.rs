use std::collections::BTreeMap;

use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::{Axis, Coordinate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::metrics::{MetricField, RawMetricBundle};
use crate::profile::{CalibrationProfile, SubMetric};
use crate::transform::Transform;

/// Normalized score of one sub-metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMetricScore {
    /// Sub-metric label from the profile.
    pub label: String,
    /// Mean of the sub-metric's normalized terms.
    pub score: f64,
}

/// Per-axis calibration breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisBreakdown {
    /// Unclipped mean of the sub-metric scores.
    pub raw_mean: f64,
    /// Final axis value, clipped to `[0, 1]`.
    pub value: f64,
    /// Scores of the individual sub-metrics in profile order.
    pub sub_metrics: Vec<SubMetricScore>,
}

/// Coordinate together with the sub-metric scores that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    /// Calibrated coordinate.
    pub coordinate: Coordinate,
    /// Breakdown per axis.
    pub axes: BTreeMap<Axis, AxisBreakdown>,
}

/// Maps raw metric bundles onto coordinates.
///
/// Deterministic: identical bundles give bit-identical coordinates. Missing
/// or out-of-range fields are errors; nothing is ever defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibrator {
    profile: CalibrationProfile,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self {
            profile: CalibrationProfile::software_team(),
        }
    }
}

impl Calibrator {
    /// Validates `profile` and builds a calibrator around it.
    pub fn new(profile: CalibrationProfile) -> Result<Self, LjpwError> {
        profile.validate()?;
        Ok(Self { profile })
    }

    /// Profile in use.
    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Converts a bundle into a coordinate.
    pub fn calibrate(&self, bundle: &RawMetricBundle) -> Result<Coordinate, LjpwError> {
        let mut values = [0.0; 4];
        for axis in Axis::ALL {
            values[axis.index()] = self.calibrate_axis(axis, bundle)?;
        }
        Coordinate::from_vector(values)
    }

    /// Calibrates a single axis.
    pub fn calibrate_axis(&self, axis: Axis, bundle: &RawMetricBundle) -> Result<f64, LjpwError> {
        Ok(self.axis_breakdown(axis, bundle)?.value)
    }

    /// Converts a bundle and keeps the per-sub-metric scores.
    pub fn calibrate_detailed(
        &self,
        bundle: &RawMetricBundle,
    ) -> Result<CalibrationReport, LjpwError> {
        let mut axes = BTreeMap::new();
        let mut values = [0.0; 4];
        for axis in Axis::ALL {
            let breakdown = self.axis_breakdown(axis, bundle)?;
            values[axis.index()] = breakdown.value;
            axes.insert(axis, breakdown);
        }
        Ok(CalibrationReport {
            coordinate: Coordinate::from_vector(values)?,
            axes,
        })
    }

    fn axis_breakdown(
        &self,
        axis: Axis,
        bundle: &RawMetricBundle,
    ) -> Result<AxisBreakdown, LjpwError> {
        let subs = self.profile.sub_metrics(axis);
        if subs.is_empty() {
            return Err(LjpwError::Configuration(
                ErrorInfo::new("empty-axis", "profile declares no sub-metrics for axis")
                    .with_context("axis", axis.label()),
            ));
        }
        let mut sub_metrics = Vec::with_capacity(subs.len());
        for sub in subs {
            sub_metrics.push(SubMetricScore {
                label: sub.label.clone(),
                score: score_sub_metric(sub, bundle)?,
            });
        }
        let raw_mean =
            sub_metrics.iter().map(|s| s.score).sum::<f64>() / sub_metrics.len() as f64;
        let value = raw_mean.clamp(0.0, 1.0);
        debug!(
            "calibrated {} from {} sub-metrics: {:.4}",
            axis.label(),
            sub_metrics.len(),
            value
        );
        Ok(AxisBreakdown {
            raw_mean,
            value,
            sub_metrics,
        })
    }
}

fn score_sub_metric(sub: &SubMetric, bundle: &RawMetricBundle) -> Result<f64, LjpwError> {
    let mut total = 0.0;
    for term in &sub.terms {
        let value = read_field(bundle, term.field)?;
        let companion = match term.transform {
            Transform::BaselineImprovement { baseline } => Some(read_divisor(bundle, baseline)?),
            Transform::TargetAttainment { target } => Some(read_field(bundle, target)?),
            _ => None,
        };
        total += term.transform.apply(value, companion);
    }
    Ok(total / sub.terms.len() as f64)
}

fn read_field(bundle: &RawMetricBundle, field: MetricField) -> Result<f64, LjpwError> {
    let value = bundle.get(field).ok_or_else(|| {
        LjpwError::Calibration(
            ErrorInfo::new("missing-metric", format!("metric `{field}` was not supplied"))
                .with_context("field", field.name()),
        )
    })?;
    let range = field.range();
    if !range.contains(value) {
        return Err(LjpwError::Calibration(
            ErrorInfo::new(
                "metric-out-of-range",
                format!("metric `{field}` lies outside its declared range {range}"),
            )
            .with_context("field", field.name())
            .with_context("value", value.to_string()),
        ));
    }
    Ok(value)
}

/// Baselines divide, so zero is rejected even where the field's declared
/// range admits it.
fn read_divisor(bundle: &RawMetricBundle, field: MetricField) -> Result<f64, LjpwError> {
    let value = read_field(bundle, field)?;
    if value <= 0.0 {
        return Err(LjpwError::Calibration(
            ErrorInfo::new(
                "zero-reference",
                format!("metric `{field}` is used as a reference and must be positive"),
            )
            .with_context("field", field.name())
            .with_context("value", value.to_string()),
        ));
    }
    Ok(value)
}
