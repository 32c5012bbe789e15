use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Golden-ratio conjugate, `φ − 1`.
pub const LOVE_EQUILIBRIUM: f64 = 0.618_033_988_749_894_9;
/// Pythagorean ratio, `√2 − 1`.
pub const JUSTICE_EQUILIBRIUM: f64 = 0.414_213_562_373_095_1;
/// `e − 2`.
pub const POWER_EQUILIBRIUM: f64 = 0.718_281_828_459_045_1;
/// `ln 2`.
pub const WISDOM_EQUILIBRIUM: f64 = std::f64::consts::LN_2;

fn default_anchor() -> Coordinate {
    Coordinate::anchor()
}

fn default_natural_equilibrium() -> Coordinate {
    natural_equilibrium()
}

/// The natural-equilibrium coordinate `(φ−1, √2−1, e−2, ln 2)`.
pub fn natural_equilibrium() -> Coordinate {
    match Coordinate::new(
        LOVE_EQUILIBRIUM,
        JUSTICE_EQUILIBRIUM,
        POWER_EQUILIBRIUM,
        WISDOM_EQUILIBRIUM,
    ) {
        Ok(coord) => coord,
        Err(_) => unreachable!("equilibrium constants lie inside the unit interval"),
    }
}

/// Reference points used as distance targets. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoints {
    /// Theoretical maximum on every axis.
    #[serde(default = "default_anchor")]
    pub anchor: Coordinate,
    /// Natural-equilibrium reference used for equilibrium comparisons.
    #[serde(default = "default_natural_equilibrium")]
    pub natural_equilibrium: Coordinate,
}

impl Default for ReferencePoints {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            natural_equilibrium: default_natural_equilibrium(),
        }
    }
}
