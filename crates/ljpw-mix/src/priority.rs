use ljpw_core::{Axis, AxisValues, Coordinate};
use serde::{Deserialize, Serialize};

/// Weight applied to the amplifier's gap when ranking.
pub const AMPLIFIER_PRIORITY_WEIGHT: f64 = 2.0;

/// Remaining distance on one axis and its ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisGap {
    /// Axis.
    pub axis: Axis,
    /// `anchor − coord` on this axis.
    pub gap: f64,
    /// Ranking score; the gap, doubled for the amplifier.
    pub priority: f64,
}

/// `anchor − coord` per axis.
pub fn optimization_vector(coord: &Coordinate, anchor: &Coordinate) -> AxisValues {
    AxisValues::from_fn(|axis| anchor.get(axis) - coord.get(axis))
}

/// Axes ordered by descending priority. The sort is stable, so equal
/// priorities keep declaration order.
pub fn optimization_priority(
    coord: &Coordinate,
    anchor: &Coordinate,
    amplifier: Axis,
) -> Vec<AxisGap> {
    let vector = optimization_vector(coord, anchor);
    let mut gaps: Vec<AxisGap> = Axis::ALL
        .into_iter()
        .map(|axis| {
            let gap = vector.get(axis);
            let priority = if axis == amplifier {
                gap * AMPLIFIER_PRIORITY_WEIGHT
            } else {
                gap
            };
            AxisGap {
                axis,
                gap,
                priority,
            }
        })
        .collect();
    gaps.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    gaps
}
