#![deny(missing_docs)]
#![doc = "Calibration of raw observational metrics into LJPW coordinates via declared per-metric normalization strategies."]

/// Calibrator entry points and breakdown records.
pub mod calibrator;
/// Raw metric bundle and field declarations.
pub mod metrics;
/// Axis to sub-metric declarations.
pub mod profile;
/// Normalization strategies.
pub mod transform;

pub use calibrator::{AxisBreakdown, CalibrationReport, Calibrator, SubMetricScore};
pub use metrics::{FieldRange, MetricField, RawMetricBundle};
pub use profile::{CalibrationProfile, SubMetric, Term};
pub use transform::Transform;
