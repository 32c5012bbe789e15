use ljpw_core::{AxisValues, Coordinate, ReferencePoints};
use serde::{Deserialize, Serialize};

/// Equilibrium distance under which a coordinate counts as settled.
pub const NEAR_EQUILIBRIUM_DISTANCE: f64 = 0.2;

/// Qualitative reading of an [`EquilibriumComparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumInterpretation {
    /// Within [`NEAR_EQUILIBRIUM_DISTANCE`] of equilibrium.
    NearEquilibrium,
    /// Closer to the anchor than to equilibrium.
    BeyondEquilibrium,
    /// Still between the origin and equilibrium.
    Developing,
}

/// Per-axis and aggregate comparison against the natural equilibrium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumComparison {
    /// Reference equilibrium used.
    pub equilibrium: Coordinate,
    /// `coord − equilibrium` per axis.
    pub differences: AxisValues,
    /// Differences as a percentage of the equilibrium value.
    pub percent_differences: AxisValues,
    /// Euclidean distance to equilibrium.
    pub distance_to_equilibrium: f64,
    /// Euclidean distance to the anchor.
    pub distance_to_anchor: f64,
    /// Qualitative reading.
    pub interpretation: EquilibriumInterpretation,
}

/// Compares `coord` against `reference.natural_equilibrium` and
/// `reference.anchor`.
pub fn compare_to_equilibrium(
    coord: &Coordinate,
    reference: &ReferencePoints,
) -> EquilibriumComparison {
    let eq = reference.natural_equilibrium;
    let differences = AxisValues::from_fn(|axis| coord.get(axis) - eq.get(axis));
    let percent_differences = AxisValues::from_fn(|axis| {
        let base = eq.get(axis);
        if base == 0.0 {
            0.0
        } else {
            differences.get(axis) / base * 100.0
        }
    });
    let distance_to_equilibrium = coord.distance_to(&eq);
    let distance_to_anchor = coord.distance_to(&reference.anchor);

    let interpretation = if distance_to_equilibrium < NEAR_EQUILIBRIUM_DISTANCE {
        EquilibriumInterpretation::NearEquilibrium
    } else if distance_to_anchor < distance_to_equilibrium {
        EquilibriumInterpretation::BeyondEquilibrium
    } else {
        EquilibriumInterpretation::Developing
    };

    EquilibriumComparison {
        equilibrium: eq,
        differences,
        percent_differences,
        distance_to_equilibrium,
        distance_to_anchor,
        interpretation,
    }
}
