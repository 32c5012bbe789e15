//! A coefficient `κ(s → t)` states that one unit of axis `s` amplifies the
//! effective value of axis `t` by `κ`:
//!
//! ```text
//! effective(t) = x_t · (1 + Σ_{s ≠ t} κ(s → t) · x_s)
//! ```

use std::collections::BTreeMap;

use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::{Axis, AxisValues, Coordinate};
use serde::{Deserialize, Serialize};

/// Serialized form of a single matrix entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouplingEntry {
    /// Amplifying axis.
    pub source: Axis,
    /// Amplified axis.
    pub target: Axis,
    /// Non-negative amplification factor.
    pub coefficient: f64,
}

/// Sparse map from ordered axis pairs to coupling coefficients.
///
/// Absent pairs mean zero coupling. Self-coupling and negative or
/// non-finite coefficients are rejected at construction, so a matrix value
/// is always usable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CouplingEntry>", into = "Vec<CouplingEntry>")]
pub struct CouplingMatrix {
    entries: BTreeMap<(Axis, Axis), f64>,
}

const LOVE_AMPLIFICATION: [(Axis, Axis, f64); 3] = [
    (Axis::Love, Axis::Justice, 1.4),
    (Axis::Love, Axis::Power, 1.3),
    (Axis::Love, Axis::Wisdom, 1.5),
];

const FULL: [(Axis, Axis, f64); 12] = [
    (Axis::Love, Axis::Justice, 1.4),
    (Axis::Love, Axis::Power, 1.3),
    (Axis::Love, Axis::Wisdom, 1.5),
    (Axis::Justice, Axis::Love, 0.9),
    (Axis::Justice, Axis::Power, 0.7),
    (Axis::Justice, Axis::Wisdom, 1.2),
    (Axis::Power, Axis::Love, 0.6),
    (Axis::Power, Axis::Justice, 0.8),
    (Axis::Power, Axis::Wisdom, 0.5),
    (Axis::Wisdom, Axis::Love, 1.3),
    (Axis::Wisdom, Axis::Justice, 1.1),
    (Axis::Wisdom, Axis::Power, 1.0),
];

fn check_entry(source: Axis, target: Axis, coefficient: f64) -> Result<(), LjpwError> {
    if source == target {
        return Err(LjpwError::Configuration(
            ErrorInfo::new("self-coupling", "an axis cannot amplify itself")
                .with_context("axis", source.label()),
        ));
    }
    if !coefficient.is_finite() || coefficient < 0.0 {
        return Err(LjpwError::Configuration(
            ErrorInfo::new(
                "invalid-coefficient",
                "coupling coefficients must be finite and non-negative",
            )
            .with_context("source", source.label())
            .with_context("target", target.label())
            .with_context("coefficient", coefficient.to_string()),
        ));
    }
    Ok(())
}

impl CouplingMatrix {
    /// Matrix with no coupling at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Love amplifies the three other axes (1.4, 1.3, 1.5).
    pub fn love_amplification() -> Self {
        Self::from_table(&LOVE_AMPLIFICATION)
    }

    /// Complete off-diagonal matrix.
    pub fn full() -> Self {
        Self::from_table(&FULL)
    }

    fn from_table(table: &[(Axis, Axis, f64)]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|&(source, target, coefficient)| ((source, target), coefficient))
                .collect(),
        }
    }

    /// Builds a matrix from entries, rejecting invalid or duplicate pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CouplingEntry>,
    ) -> Result<Self, LjpwError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            check_entry(entry.source, entry.target, entry.coefficient)?;
            if map
                .insert((entry.source, entry.target), entry.coefficient)
                .is_some()
            {
                return Err(LjpwError::Configuration(
                    ErrorInfo::new("duplicate-coupling", "pair declared more than once")
                        .with_context("source", entry.source.label())
                        .with_context("target", entry.target.label()),
                ));
            }
        }
        Ok(Self { entries: map })
    }

    /// Returns a new matrix with `source → target` set to `coefficient`.
    pub fn with_coefficient(
        &self,
        source: Axis,
        target: Axis,
        coefficient: f64,
    ) -> Result<Self, LjpwError> {
        check_entry(source, target, coefficient)?;
        let mut entries = self.entries.clone();
        entries.insert((source, target), coefficient);
        Ok(Self { entries })
    }

    /// Coefficient for `source → target`; zero when absent.
    pub fn coefficient(&self, source: Axis, target: Axis) -> f64 {
        self.entries.get(&(source, target)).copied().unwrap_or(0.0)
    }

    /// Populated entries in `(source, target)` order.
    pub fn entries(&self) -> Vec<CouplingEntry> {
        self.entries
            .iter()
            .map(|(&(source, target), &coefficient)| CouplingEntry {
                source,
                target,
                coefficient,
            })
            .collect()
    }

    /// Number of populated pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair is populated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<CouplingEntry>> for CouplingMatrix {
    type Error = LjpwError;

    fn try_from(entries: Vec<CouplingEntry>) -> Result<Self, Self::Error> {
        CouplingMatrix::from_entries(entries)
    }
}

impl From<CouplingMatrix> for Vec<CouplingEntry> {
    fn from(matrix: CouplingMatrix) -> Self {
        matrix.entries()
    }
}

/// Multiplier `1 + Σ κ(s → target) · x_s` over every other axis.
pub fn amplification(target: Axis, coordinate: &Coordinate, matrix: &CouplingMatrix) -> f64 {
    1.0 + Axis::ALL
        .into_iter()
        .filter(|&source| source != target)
        .map(|source| matrix.coefficient(source, target) * coordinate.get(source))
        .sum::<f64>()
}

/// Coupling-effective value of `target`.
pub fn effective_value(target: Axis, coordinate: &Coordinate, matrix: &CouplingMatrix) -> f64 {
    coordinate.get(target) * amplification(target, coordinate, matrix)
}

/// Effective values of all four axes.
pub fn effective_values(coordinate: &Coordinate, matrix: &CouplingMatrix) -> AxisValues {
    AxisValues::from_fn(|axis| effective_value(axis, coordinate, matrix))
}
