use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::{Axis, AxisValues, Coordinate, ReferencePoints};
use serde::{Deserialize, Serialize};

use crate::coupling::{effective_value, CouplingMatrix};

const WEIGHT_TOLERANCE: f64 = 1e-9;

fn default_axis_weights() -> AxisValues {
    AxisValues {
        love: 0.35,
        justice: 0.25,
        power: 0.20,
        wisdom: 0.20,
    }
}

/// Weights of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    /// Weight of the harmonic mean.
    pub robustness: f64,
    /// Weight of the geometric mean.
    pub effectiveness: f64,
    /// Weight of the coupling-weighted sum.
    pub growth_potential: f64,
    /// Weight of the anchor-distance score.
    pub harmony: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            robustness: 0.15,
            effectiveness: 0.25,
            growth_potential: 0.35,
            harmony: 0.25,
        }
    }
}

/// Mixer configuration. Both weight sets must be non-negative and sum to 1.
///
/// The defaults give the amplifier axis (Love) the largest growth weight and
/// growth potential the largest composite weight. Validation checks only
/// sign and normalization, so a custom configuration may drop either
/// ordering, for instance when the amplifier is moved to another axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixerConfig {
    /// Per-axis weights of the growth-potential sum.
    #[serde(default = "default_axis_weights")]
    pub axis_weights: AxisValues,
    /// Weights of the composite score.
    #[serde(default)]
    pub composite_weights: CompositeWeights,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            axis_weights: default_axis_weights(),
            composite_weights: CompositeWeights::default(),
        }
    }
}

fn check_weights(set: &str, weights: &[(&str, f64)]) -> Result<(), LjpwError> {
    for &(name, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(LjpwError::Configuration(
                ErrorInfo::new("negative-weight", "weights must be finite and non-negative")
                    .with_context("set", set)
                    .with_context("weight", name)
                    .with_context("value", weight.to_string()),
            ));
        }
    }
    let total: f64 = weights.iter().map(|&(_, weight)| weight).sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(LjpwError::Configuration(
            ErrorInfo::new("weights-not-normalized", "weights must sum to 1.0")
                .with_context("set", set)
                .with_context("sum", total.to_string()),
        ));
    }
    Ok(())
}

impl MixerConfig {
    /// Checks both weight sets.
    pub fn validate(&self) -> Result<(), LjpwError> {
        let axis: Vec<(&str, f64)> = Axis::ALL
            .iter()
            .map(|&axis| (axis.label(), self.axis_weights.get(axis)))
            .collect();
        check_weights("axis_weights", &axis)?;
        let c = &self.composite_weights;
        check_weights(
            "composite_weights",
            &[
                ("robustness", c.robustness),
                ("effectiveness", c.effectiveness),
                ("growth_potential", c.growth_potential),
                ("harmony", c.harmony),
            ],
        )
    }
}

/// The five aggregate scores of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixScores {
    /// Harmonic mean; dominated by the weakest axis.
    pub robustness: f64,
    /// Geometric mean; zero if any axis is zero.
    pub effectiveness: f64,
    /// Coupling-weighted sum; unbounded above.
    pub growth_potential: f64,
    /// `1 / (1 + distance to anchor)`.
    pub harmony: f64,
    /// Convex combination of the four scores above.
    pub composite: f64,
}

/// Harmonic mean of the axes, or 0.0 when any axis is zero.
pub fn harmonic_mean(coord: &Coordinate) -> f64 {
    let mut values = coord.to_vector();
    if values.iter().any(|&v| v <= 0.0) {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    4.0 / values.iter().map(|v| 1.0 / v).sum::<f64>()
}

/// Geometric mean of the axes.
pub fn geometric_mean(coord: &Coordinate) -> f64 {
    let mut values = coord.to_vector();
    // Sorted so the product does not depend on axis order.
    values.sort_by(f64::total_cmp);
    values.iter().product::<f64>().powf(0.25)
}

/// Computes aggregate scores with a fixed configuration, coupling matrix and
/// anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    config: MixerConfig,
    matrix: CouplingMatrix,
    reference: ReferencePoints,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            config: MixerConfig::default(),
            matrix: CouplingMatrix::love_amplification(),
            reference: ReferencePoints::default(),
        }
    }
}

impl Mixer {
    /// Validates the configuration and builds a mixer.
    pub fn new(
        config: MixerConfig,
        matrix: CouplingMatrix,
        reference: ReferencePoints,
    ) -> Result<Self, LjpwError> {
        config.validate()?;
        Ok(Self {
            config,
            matrix,
            reference,
        })
    }

    /// Default weights and anchor with a caller-supplied matrix.
    pub fn with_matrix(matrix: CouplingMatrix) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    /// Active coupling matrix.
    pub fn matrix(&self) -> &CouplingMatrix {
        &self.matrix
    }

    /// Active reference points.
    pub fn reference(&self) -> &ReferencePoints {
        &self.reference
    }

    /// Harmonic mean.
    pub fn robustness(&self, coord: &Coordinate) -> f64 {
        harmonic_mean(coord)
    }

    /// Geometric mean.
    pub fn effectiveness(&self, coord: &Coordinate) -> f64 {
        geometric_mean(coord)
    }

    /// Weighted sum of coupling-effective axis values.
    pub fn growth_potential(&self, coord: &Coordinate) -> f64 {
        Axis::ALL
            .into_iter()
            .map(|axis| {
                self.config.axis_weights.get(axis) * effective_value(axis, coord, &self.matrix)
            })
            .sum()
    }

    /// Anchor-distance score in `(0, 1]`.
    pub fn harmony(&self, coord: &Coordinate) -> f64 {
        1.0 / (1.0 + coord.distance_to(&self.reference.anchor))
    }

    /// All five scores.
    pub fn mix(&self, coord: &Coordinate) -> MixScores {
        let robustness = self.robustness(coord);
        let effectiveness = self.effectiveness(coord);
        let growth_potential = self.growth_potential(coord);
        let harmony = self.harmony(coord);
        let w = &self.config.composite_weights;
        let composite = w.robustness * robustness
            + w.effectiveness * effectiveness
            + w.growth_potential * growth_potential
            + w.harmony * harmony;
        MixScores {
            robustness,
            effectiveness,
            growth_potential,
            harmony,
            composite,
        }
    }
}
