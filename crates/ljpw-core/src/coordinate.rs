use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LjpwError};

/// One of the four named dimensions of a [`Coordinate`].
///
/// Declaration order is significant: it is the iteration order of
/// [`Axis::ALL`], the component order of [`Coordinate::to_vector`], and the
/// tie-break order when searching for a bottleneck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Relational health (connectivity, usability, safety).
    #[serde(rename = "L", alias = "love")]
    Love,
    /// Structural health (tests, architecture, standards).
    #[serde(rename = "J", alias = "justice")]
    Justice,
    /// Executional health (velocity, latency, capacity).
    #[serde(rename = "P", alias = "power")]
    Power,
    /// Informational health (documentation, onboarding, knowledge).
    #[serde(rename = "W", alias = "wisdom")]
    Wisdom,
}

impl Axis {
    /// All axes in declaration order.
    pub const ALL: [Axis; 4] = [Axis::Love, Axis::Justice, Axis::Power, Axis::Wisdom];

    /// Position of the axis inside [`Coordinate::to_vector`].
    pub const fn index(self) -> usize {
        match self {
            Axis::Love => 0,
            Axis::Justice => 1,
            Axis::Power => 2,
            Axis::Wisdom => 3,
        }
    }

    /// Single-letter label (`L`, `J`, `P`, `W`).
    pub const fn label(self) -> &'static str {
        match self {
            Axis::Love => "L",
            Axis::Justice => "J",
            Axis::Power => "P",
            Axis::Wisdom => "W",
        }
    }

    /// Full axis name.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::Love => "Love",
            Axis::Justice => "Justice",
            Axis::Power => "Power",
            Axis::Wisdom => "Wisdom",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct AxisRepr {
    #[serde(rename = "L")]
    love: f64,
    #[serde(rename = "J")]
    justice: f64,
    #[serde(rename = "P")]
    power: f64,
    #[serde(rename = "W")]
    wisdom: f64,
}

/// A point in `[0, 1]^4`.
///
/// Immutable once constructed; every constructor (including
/// deserialization) enforces the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisRepr", into = "AxisRepr")]
pub struct Coordinate {
    values: [f64; 4],
}

impl Coordinate {
    /// Builds a coordinate, rejecting any axis outside `[0, 1]`.
    pub fn new(love: f64, justice: f64, power: f64, wisdom: f64) -> Result<Self, LjpwError> {
        Self::from_vector([love, justice, power, wisdom])
    }

    /// Builds a coordinate from an axis-ordered array.
    pub fn from_vector(values: [f64; 4]) -> Result<Self, LjpwError> {
        for axis in Axis::ALL {
            let value = values[axis.index()];
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(LjpwError::Range(
                    ErrorInfo::new("axis-out-of-range", "coordinate axes must lie in [0, 1]")
                        .with_context("axis", axis.label())
                        .with_context("value", value.to_string()),
                ));
            }
        }
        Ok(Self { values })
    }

    /// The anchor point `(1, 1, 1, 1)`.
    pub const fn anchor() -> Self {
        Self { values: [1.0; 4] }
    }

    /// Value of a single axis.
    pub fn get(&self, axis: Axis) -> f64 {
        self.values[axis.index()]
    }

    /// Love axis value.
    pub fn love(&self) -> f64 {
        self.values[0]
    }

    /// Justice axis value.
    pub fn justice(&self) -> f64 {
        self.values[1]
    }

    /// Power axis value.
    pub fn power(&self) -> f64 {
        self.values[2]
    }

    /// Wisdom axis value.
    pub fn wisdom(&self) -> f64 {
        self.values[3]
    }

    /// Euclidean distance in four-space.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Axis-ordered components.
    pub fn to_vector(&self) -> [f64; 4] {
        self.values
    }

    /// Iterates `(axis, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

impl Index<Axis> for Coordinate {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.values[axis.index()]
    }
}

impl TryFrom<AxisRepr> for Coordinate {
    type Error = LjpwError;

    fn try_from(repr: AxisRepr) -> Result<Self, Self::Error> {
        Coordinate::new(repr.love, repr.justice, repr.power, repr.wisdom)
    }
}

impl From<Coordinate> for AxisRepr {
    fn from(coord: Coordinate) -> Self {
        AxisRepr {
            love: coord.values[0],
            justice: coord.values[1],
            power: coord.values[2],
            wisdom: coord.values[3],
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={:.3}, J={:.3}, P={:.3}, W={:.3}",
            self.values[0], self.values[1], self.values[2], self.values[3]
        )
    }
}

/// Unconstrained per-axis values (effective values, gaps, differences).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    /// Love component.
    #[serde(rename = "L")]
    pub love: f64,
    /// Justice component.
    #[serde(rename = "J")]
    pub justice: f64,
    /// Power component.
    #[serde(rename = "P")]
    pub power: f64,
    /// Wisdom component.
    #[serde(rename = "W")]
    pub wisdom: f64,
}

impl AxisValues {
    /// Builds the record by evaluating `f` once per axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> f64) -> Self {
        Self {
            love: f(Axis::Love),
            justice: f(Axis::Justice),
            power: f(Axis::Power),
            wisdom: f(Axis::Wisdom),
        }
    }

    /// Value of a single axis.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Love => self.love,
            Axis::Justice => self.justice,
            Axis::Power => self.power,
            Axis::Wisdom => self.wisdom,
        }
    }

    /// Axis-ordered components.
    pub fn to_vector(&self) -> [f64; 4] {
        [self.love, self.justice, self.power, self.wisdom]
    }
}

impl From<Coordinate> for AxisValues {
    fn from(coord: Coordinate) -> Self {
        AxisValues::from_fn(|axis| coord.get(axis))
    }
}
